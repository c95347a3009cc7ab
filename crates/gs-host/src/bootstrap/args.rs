use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_CONFIG_FILE: &str = "govservices.toml";

/// Onboarding wizard for GovServices, driven from the terminal
#[derive(Debug, Clone, Parser)]
#[command(name = "govservices")]
#[command(version, about, long_about = None)]
pub struct HostArgs {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Resolve every simulated request without latency
    #[arg(long)]
    pub fast: bool,
    /// Locale used to render the wizard, overrides `general.default_locale`
    #[arg(short, long)]
    pub locale: Option<String>,
    /// Also write log lines to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags() {
        let args = HostArgs::parse_from(["govservices"]);
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert!(!args.fast);
        assert!(args.locale.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn flags_are_parsed() {
        let args = HostArgs::parse_from([
            "govservices",
            "--config",
            "/etc/gs.toml",
            "--fast",
            "-l",
            "hi",
        ]);
        assert_eq!(args.config, PathBuf::from("/etc/gs.toml"));
        assert!(args.fast);
        assert_eq!(args.locale.as_deref(), Some("hi"));
    }
}
