//! Café Till

use std::{io, process::ExitCode};

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cafe_till::{
    config::TillConfig, receipt::ReceiptPrinter, shell::Shell, store::JsonFileStore,
    till::OrderService,
};

fn main() -> ExitCode {
    // Load configuration from .env and CLI arguments
    let config = TillConfig::load().unwrap_or_else(|err| err.exit());

    // Logs go to stderr; stdout carries the menu
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let catalog = match config.catalog() {
        Ok(catalog) => catalog,
        Err(err) => {
            error!(error = ?err, "failed to load catalog");

            return ExitCode::FAILURE;
        }
    };

    let today = config.day();

    info!(
        orders_file = %config.orders_file.display(),
        products = catalog.len(),
        %today,
        "starting till"
    );

    let service = OrderService::new(
        catalog,
        JsonFileStore::new(&config.orders_file),
        config.manager_gate(),
    );

    let mut shell = Shell::new(
        service,
        ReceiptPrinter::new(config.currency.currency()),
        today,
        io::stdin().lock(),
        io::stdout().lock(),
    );

    match shell.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = ?err, "till stopped");

            #[expect(
                clippy::print_stderr,
                reason = "the operator needs to see why the till stopped even when logging is filtered"
            )]
            {
                eprintln!("Error: {err}");
            }

            ExitCode::FAILURE
        }
    }
}
