use crate::{
    cli::globals::GlobalArgs,
    config::{normalize_value, GatewayConfig, ManagerConfig, DEFAULT_BASE_URL},
    view::OutputFormat,
};
use anyhow::{Context, Result};
use clap::{Arg, Command};
use std::time::Duration;

pub const ARG_BASE_URL: &str = "base-url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_ERROR_TTL: &str = "error-ttl";
pub const ARG_OUTPUT: &str = "output";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_BASE_URL)
                .long(ARG_BASE_URL)
                .help("Base URL of the user resource, /users is appended")
                .env("USERMGR_BASE_URL")
                .default_value(DEFAULT_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("USERMGR_TIMEOUT")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..))
                .global(true),
        )
        .arg(
            Arg::new(ARG_ERROR_TTL)
                .long(ARG_ERROR_TTL)
                .help("Seconds an error message stays visible (default: until the next successful operation)")
                .env("USERMGR_ERROR_TTL")
                .value_parser(clap::value_parser!(u64).range(1..))
                .global(true),
        )
        .arg(
            Arg::new(ARG_OUTPUT)
                .short('o')
                .long(ARG_OUTPUT)
                .help("Output format")
                .env("USERMGR_OUTPUT")
                .value_parser(["table", "json"])
                .default_value("table")
                .global(true),
        )
}

#[derive(Debug)]
pub struct Options {
    pub base_url: String,
    pub timeout: Duration,
    pub error_ttl: Option<Duration>,
    pub output: OutputFormat,
}

impl Options {
    /// Read the gateway and output options.
    ///
    /// # Errors
    /// Returns an error if the output format is not recognized.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let base_url = matches
            .get_one::<String>(ARG_BASE_URL)
            .and_then(|value| normalize_value(value))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = matches.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(10);
        let error_ttl = matches
            .get_one::<u64>(ARG_ERROR_TTL)
            .copied()
            .map(Duration::from_secs);
        let output = matches
            .get_one::<String>(ARG_OUTPUT)
            .map_or(Ok(OutputFormat::Table), |value| value.parse())
            .map_err(|err: String| anyhow::anyhow!(err))?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout),
            error_ttl,
            output,
        })
    }

    /// Validate into the settings shared by all subcommands.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn into_globals(self) -> Result<GlobalArgs> {
        let gateway = GatewayConfig::new(&self.base_url, self.timeout)
            .with_context(|| format!("invalid --{ARG_BASE_URL}"))?;

        let mut globals = GlobalArgs::new(gateway);
        globals.manager = ManagerConfig {
            error_ttl: self.error_ttl,
        };
        globals.set_output(self.output);

        Ok(globals)
    }
}
