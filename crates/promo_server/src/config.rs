use anyhow::anyhow;
use chrono_tz::Tz;
use clap::Parser;
use promo_core::{UserId, DEFAULT_CODE_PREFIX};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "promo-server")]
#[command(about = "Promotional registration bot service")]
#[command(version)]
pub struct Cli {
    /// Enable debug mode
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,

    /// Server port
    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    pub host: String,

    /// Chat identity allowed to run operator commands
    #[arg(long, env = "OPERATOR_ID")]
    pub operator_id: String,

    /// Contact shown to participants when registration fails
    #[arg(long, env = "OPERATOR_CONTACT", default_value = "@lazizln")]
    pub operator_contact: String,

    /// Participant log
    #[arg(long, env = "DATA_FILE", default_value = "registrations.csv")]
    pub data_file: PathBuf,

    /// Prefix of generated redemption codes
    #[arg(long, env = "CODE_PREFIX", default_value = DEFAULT_CODE_PREFIX)]
    pub code_prefix: String,

    /// IANA time zone for registration timestamps
    #[arg(long, env = "TIMEZONE", default_value = "Asia/Tashkent")]
    pub timezone: String,

    /// Log filter (overrides debug flag)
    #[arg(long, env = "RUST_LOG")]
    pub log_level: Option<String>,
}

/// Validated runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub operator_id: UserId,
    pub operator_contact: String,
    pub data_file: PathBuf,
    pub code_prefix: String,
    pub timezone: Tz,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let operator_id = cli.operator_id.trim();
        if operator_id.is_empty() {
            return Err(anyhow!("OPERATOR_ID must not be empty"));
        }

        let timezone: Tz = cli
            .timezone
            .parse()
            .map_err(|e| anyhow!("Invalid TIMEZONE {:?}: {}", cli.timezone, e))?;

        Ok(Self {
            host: cli.host,
            port: cli.port,
            operator_id: UserId::new(operator_id),
            operator_contact: cli.operator_contact,
            data_file: cli.data_file,
            code_prefix: cli.code_prefix,
            timezone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("promo-server").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_cli(parse(&["--operator-id", "6434717615"])).unwrap();

        assert_eq!(settings.operator_id, UserId::from(6434717615i64));
        assert_eq!(settings.code_prefix, "USMON");
        assert_eq!(settings.timezone, chrono_tz::Asia::Tashkent);
        assert_eq!(settings.data_file, PathBuf::from("registrations.csv"));
    }

    #[test]
    fn test_rejects_unknown_timezone() {
        let cli = parse(&["--operator-id", "1", "--timezone", "Mars/Olympus"]);
        assert!(Settings::from_cli(cli).is_err());
    }

    #[test]
    fn test_rejects_blank_operator() {
        let cli = parse(&["--operator-id", "  "]);
        assert!(Settings::from_cli(cli).is_err());
    }
}
