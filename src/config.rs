//! Runner configuration

use std::path::PathBuf;

use clap::Args;
use orderflow::money::{MoneyParseError, currency_from_code};
use rusty_money::iso::Currency;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub(crate) log_format: LogFormat,
}

/// Where catalog data lives and which currency command-line amounts are in.
#[derive(Debug, Args)]
pub(crate) struct StoreConfig {
    /// Directory holding `catalog/<set>.yml` fixture sets
    #[arg(long, env = "ORDERFLOW_FIXTURES", default_value = "./fixtures", global = true)]
    pub(crate) fixtures: PathBuf,

    /// Currency code for amounts given on the command line (GBP, USD, EUR, INR)
    #[arg(long, env = "ORDERFLOW_CURRENCY", default_value = "INR", global = true)]
    pub(crate) currency: String,
}

impl StoreConfig {
    /// Resolve the configured currency code.
    pub(crate) fn currency(&self) -> Result<&'static Currency, MoneyParseError> {
        currency_from_code(&self.currency)
    }
}
