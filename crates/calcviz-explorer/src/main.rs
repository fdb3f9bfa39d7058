//! Main entry point for calcviz.

use anyhow::Context;
use calcviz_common::{init_default_logging, init_logging};
use calcviz_config::{Config, ConfigLoader};
use calcviz_explorer::Explorer;
use std::env;
use std::path::PathBuf;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            // Without a configuration there are no logging settings either.
            init_default_logging().context("failed to initialise logging")?;
            error!("Failed to load configuration: {}", e);
            return Err(e).context("failed to load configuration");
        }
    };
    init_logging(&config.logging).context("failed to initialise logging")?;

    info!(
        function = %config.derivative.function,
        format = ?config.output.format,
        "Starting calcviz"
    );

    let mut explorer = Explorer::new(config)?;
    match explorer.run().await {
        Ok(written) => {
            for path in &written {
                info!(path = %path.display(), "written");
            }
            Ok(())
        }
        Err(e) => {
            error!("Explorer run failed: {}", e);
            Err(e.into())
        }
    }
}

fn load_config() -> calcviz_common::Result<Config> {
    // An explicit path argument wins over CALCVIZ_CONFIG and the default file names.
    match env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}
