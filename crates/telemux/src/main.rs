mod cmd;
mod exit;
mod logging;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};

#[derive(Parser, Debug)]
#[command(name = "telemux", version, about = "Sensor telemetry uplink CLI")]
struct Cli {
    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    match cmd::run(cli.command) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uplink_subcommand() {
        let cli = Cli::try_parse_from([
            "telemux",
            "uplink",
            "collector.local:5555",
            "--interval",
            "500ms",
            "--count",
            "10",
        ])
        .expect("uplink args should parse");

        assert!(matches!(cli.command, Command::Uplink(_)));
    }

    #[test]
    fn parses_version_subcommand() {
        let cli = Cli::try_parse_from(["telemux", "version", "--extended"])
            .expect("version args should parse");
        assert!(matches!(cli.command, Command::Version(_)));
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["telemux", "frobnicate"]).is_err());
    }
}
