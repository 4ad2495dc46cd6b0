use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wellpulse")]
#[command(version)]
#[command(about = "Regional mental-health sentiment monitoring")]
pub struct Cli {
    /// JSON config file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind address, overrides the config
        #[arg(short, long)]
        bind: Option<String>,

        /// Skip populating the corpus cache at startup
        #[arg(long)]
        no_warm: bool,
    },

    /// List monitored regions
    Regions,

    /// Monthly sentiment series
    Sentiment {
        /// Region name, comma-separated names, or "all"
        #[arg(short, long, default_value = "all")]
        region: String,

        #[arg(short, long)]
        year: Option<i32>,
    },

    /// National summary statistics
    Stats {
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Resource-allocation table
    Resources {
        /// Region name, comma-separated names, or "all"
        #[arg(short, long, default_value = "all")]
        region: String,

        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Render a chart to a PNG file
    Chart {
        /// Region name, comma-separated names, or "all" (trend charts only)
        #[arg(short, long, default_value = "all")]
        region: String,

        #[arg(short, long)]
        year: Option<i32>,

        /// "trend" or "comparison"
        #[arg(short, long, default_value = "trend")]
        kind: String,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_version() {
        let cli = Cli::try_parse_from(["wellpulse", "version"]);
        assert!(cli.is_ok());
        assert!(matches!(cli.unwrap().command, Commands::Version));
    }

    #[test]
    fn test_cli_parse_global_config() {
        let cli = Cli::try_parse_from(["wellpulse", "regions", "--config", "wellpulse.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("wellpulse.json")));
    }

    #[test]
    fn test_cli_parse_sentiment() {
        let cli = Cli::try_parse_from([
            "wellpulse",
            "sentiment",
            "--region",
            "Northeast, West Coast",
            "--year",
            "2023",
        ])
        .unwrap();
        if let Commands::Sentiment { region, year } = cli.command {
            assert_eq!(region, "Northeast, West Coast");
            assert_eq!(year, Some(2023));
        } else {
            panic!("Expected Sentiment command");
        }
    }

    #[test]
    fn test_cli_chart_requires_out() {
        assert!(Cli::try_parse_from(["wellpulse", "chart"]).is_err());

        let cli = Cli::try_parse_from(["wellpulse", "chart", "--out", "trend.png"]).unwrap();
        if let Commands::Chart { region, kind, .. } = cli.command {
            assert_eq!(region, "all");
            assert_eq!(kind, "trend");
        } else {
            panic!("Expected Chart command");
        }
    }

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::try_parse_from(["wellpulse", "serve", "--bind", "0.0.0.0:8080", "--no-warm"]).unwrap();
        if let Commands::Serve { bind, no_warm } = cli.command {
            assert_eq!(bind.as_deref(), Some("0.0.0.0:8080"));
            assert!(no_warm);
        } else {
            panic!("Expected Serve command");
        }
    }
}
