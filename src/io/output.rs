//! Logging setup for the command-line driver.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::{fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, Registry};

use crate::error::IsingError;

/// Send tracing output to `output_path`, or to stdout when none is given.
pub fn setup_output(output_path: Option<&Path>) -> Result<(), IsingError> {
    match output_path {
        Some(path) => {
            let log = File::create(path)?;
            let file_layer = layer().with_writer(Mutex::new(log)).with_ansi(false);
            Registry::default().with(file_layer).init();
            info!("Output will be written to: {}", path.display());
        }
        None => {
            let stdout_layer = layer().with_writer(std::io::stdout).with_ansi(true);
            Registry::default().with(stdout_layer).init();
        }
    }
    Ok(())
}
