//! Dashboard palette

use image::Rgb;

pub const BACKGROUND: Rgb<u8> = Rgb([0x0D, 0x1B, 0x2A]);
pub const CARD: Rgb<u8> = Rgb([0x1A, 0x2C, 0x42]);
pub const GRID: Rgb<u8> = Rgb([0x1E, 0x3A, 0x5F]);
pub const TEXT_PRIMARY: Rgb<u8> = Rgb([0xE8, 0xF4, 0xF8]);
pub const TEXT_MUTED: Rgb<u8> = Rgb([0x7B, 0xA7, 0xC2]);
pub const POSITIVE: Rgb<u8> = Rgb([0x00, 0xBF, 0xA5]);
pub const NEGATIVE: Rgb<u8> = Rgb([0xE5, 0x73, 0x73]);

/// Line colors, indexed by a region's position in the region set
pub const REGION_COLORS: [Rgb<u8>; 6] = [
    Rgb([0x00, 0xBF, 0xA5]), // teal
    Rgb([0x1B, 0x8E, 0xCA]), // blue
    Rgb([0x4D, 0xD0, 0xC4]), // light teal
    Rgb([0x64, 0xB5, 0xF6]), // light blue
    Rgb([0x80, 0xCB, 0xC4]), // muted teal
    Rgb([0x42, 0xA5, 0xF5]), // bright blue
];

/// Palette entry for the region at `position`, cycling past the end
pub fn region_color(position: usize) -> Rgb<u8> {
    REGION_COLORS[position % REGION_COLORS.len()]
}

/// Bar color for a yearly average
pub fn bar_color(avg_sentiment: f64) -> Rgb<u8> {
    if avg_sentiment >= 50.0 {
        POSITIVE
    } else {
        NEGATIVE
    }
}

/// Linear blend of `over` onto `base`
pub fn blend(base: Rgb<u8>, over: Rgb<u8>, alpha: f64) -> Rgb<u8> {
    let t = alpha.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| ((1.0 - t) * a as f64 + t * b as f64).round() as u8;
    Rgb([
        mix(base.0[0], over.0[0]),
        mix(base.0[1], over.0[1]),
        mix(base.0[2], over.0[2]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(region_color(0), region_color(6));
        assert_ne!(region_color(0), region_color(1));
    }

    #[test]
    fn test_bar_color_threshold() {
        assert_eq!(bar_color(50.0), POSITIVE);
        assert_eq!(bar_color(49.99), NEGATIVE);
    }

    #[test]
    fn test_blend() {
        let black = Rgb([0, 0, 0]);
        let white = Rgb([255, 255, 255]);
        assert_eq!(blend(black, white, 0.0), black);
        assert_eq!(blend(black, white, 1.0), white);
        assert_eq!(blend(black, white, 0.5), Rgb([128, 128, 128]));
    }
}
