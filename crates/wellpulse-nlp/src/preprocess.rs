//! Text cleanup shared by both scorers

fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c.is_whitespace() || ".,!?'\"-".contains(c)
}

/// Collapse whitespace and strip characters other than word characters and
/// basic punctuation
pub fn preprocess(text: &str) -> String {
    let filtered: String = text.chars().filter(|&c| is_kept(c)).collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}
