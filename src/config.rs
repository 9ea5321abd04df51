//! Till configuration

use std::path::PathBuf;

use clap::Parser;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::{
    access::PasswordGate,
    catalog::{Catalog, CatalogError},
    orders::OrderDay,
};

/// Configuration errors raised after the arguments were parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured catalog file could not be loaded.
    #[error("failed to load catalog {path}")]
    Catalog {
        /// Catalog file
        path: PathBuf,

        /// Underlying error
        #[source]
        source: CatalogError,
    },
}

/// Currency amounts are displayed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum DisplayCurrency {
    /// US dollar
    Usd,

    /// Pound sterling
    Gbp,

    /// Euro
    Eur,
}

impl DisplayCurrency {
    /// The ISO currency.
    pub fn currency(self) -> &'static Currency {
        match self {
            DisplayCurrency::Usd => iso::USD,
            DisplayCurrency::Gbp => iso::GBP,
            DisplayCurrency::Eur => iso::EUR,
        }
    }
}

/// Café till configuration
#[derive(Debug, Parser)]
#[command(name = "cafe-till", about = "Café order till", long_about = None)]
pub struct TillConfig {
    /// JSON file finalized orders are kept in
    #[arg(long, env = "CAFE_ORDERS_FILE", default_value = "orders.json")]
    pub orders_file: PathBuf,

    /// YAML product catalog (defaults to the built-in café menu)
    #[arg(long, env = "CAFE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Password for the manager screens
    #[arg(long, env = "CAFE_MANAGER_PASSWORD", hide_env_values = true)]
    pub manager_password: String,

    /// Display currency
    #[arg(
        long,
        env = "CAFE_CURRENCY",
        value_enum,
        ignore_case = true,
        default_value_t = DisplayCurrency::Usd
    )]
    pub currency: DisplayCurrency,

    /// Day new orders are taken on (defaults to today)
    #[arg(long, env = "CAFE_DAY", value_enum, ignore_case = true)]
    pub day: Option<OrderDay>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl TillConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// The product catalog: the configured file, or the built-in café menu.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Catalog`] if the catalog file cannot be loaded.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog {
            Some(path) => Catalog::load(path).map_err(|source| ConfigError::Catalog {
                path: path.clone(),
                source,
            }),
            None => Ok(Catalog::cafe()),
        }
    }

    /// Day new orders are taken on.
    pub fn day(&self) -> OrderDay {
        self.day.unwrap_or_else(OrderDay::today)
    }

    /// Gate for the manager screens.
    pub fn manager_gate(&self) -> PasswordGate {
        PasswordGate::new(self.manager_password.as_str())
    }
}
