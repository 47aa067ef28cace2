use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "phish-checkr",
    about = "Classify URLs as phishing or legitimate",
    version
)]
pub struct Cli {
    /// URLs to check
    pub urls: Vec<String>,

    /// Read additional URLs from a file, one per line ('#' starts a comment)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Classifier artifact directory [overrides artifacts.dir from the config]
    #[arg(long, value_name = "DIR")]
    pub artifacts: Option<PathBuf>,

    /// Config file [default: ./.phish-checkr/config.toml, fallback ~/.config/phish-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Number of URLs scored per worker batch
    #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(u16).range(1..))]
    pub batch_size: u16,

    /// Show every URL and debug logs (not just phishing results)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let cli = Cli::parse_from([
            "phish-checkr",
            "example.com",
            "http://bit.ly/x",
            "--report",
            "json",
            "-q",
        ]);
        assert_eq!(cli.urls, vec!["example.com", "http://bit.ly/x"]);
        assert!(matches!(cli.report, ReportFormat::Json));
        assert!(cli.quiet);
        assert_eq!(cli.batch_size, 64);
    }

    #[test]
    fn test_batch_size_must_be_positive() {
        assert!(Cli::try_parse_from(["phish-checkr", "--batch-size", "0"]).is_err());
    }
}
