use std::time::Duration;

use clap::{Args, Subcommand};

use crate::exit::{CliError, CliResult, USAGE};

pub mod uplink;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the uplink worker, feeding synthetic sensor records.
    Uplink(UplinkArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command) -> CliResult<i32> {
    match command {
        Command::Uplink(args) => uplink::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct UplinkArgs {
    /// Collector address to connect to (host:port).
    pub collector: String,
    /// Interval between synthetic records (e.g. 500ms, 2s).
    #[arg(long, default_value = "1s")]
    pub interval: String,
    /// Fixed delay between failed connect attempts (e.g. 1s).
    #[arg(long, default_value = "1s")]
    pub retry_delay: String,
    /// Stop after emitting N records (default: run until Ctrl-C).
    #[arg(long)]
    pub count: Option<u64>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}

/// Parse "500ms" / "5s" style durations.
pub fn parse_duration(value: &str) -> CliResult<Duration> {
    let value = value.trim();
    let (digits, unit) = value
        .find(|c: char| !c.is_ascii_digit())
        .map(|idx| value.split_at(idx))
        .ok_or_else(|| CliError::new(USAGE, format!("missing unit in duration '{value}'")))?;

    let amount: u64 = digits
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration '{value}'")))?;

    match unit {
        "ms" => Ok(Duration::from_millis(amount)),
        "s" => Ok(Duration::from_secs(amount)),
        _ => Err(CliError::new(
            USAGE,
            format!("unknown duration unit '{unit}' (use ms or s)"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_millis_and_seconds() {
        assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn rejects_bare_numbers_and_bad_units() {
        assert!(parse_duration("5").is_err());
        assert!(parse_duration("5m").is_err());
        assert!(parse_duration("abc").is_err());
    }
}
