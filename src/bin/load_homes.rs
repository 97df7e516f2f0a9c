use anyhow::Result;
use log::{error, info};

use homepricer::{config, loader, logger::setup_logger};

#[tokio::main]
async fn main() -> Result<()> {
    setup_logger()?;

    let config = config::read_config();

    match loader::run(&config).await {
        Ok(inserted) => {
            info!("Inserted {} records into 'homes' table.", inserted);
            Ok(())
        }
        Err(err) => {
            error!("Error inserting records: {:?}", err);
            std::process::exit(1);
        }
    }
}
