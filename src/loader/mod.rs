use std::io::Read;

use anyhow::{anyhow, Context, Result};
use log::info;

use crate::{
    config::Config,
    db::{self, establish_connection},
    models::home::NewHome,
};

/// Reads the dataset from an http(s) URL or, failing that prefix, a local path.
pub async fn fetch_dataset(source: &str) -> Result<String> {
    if !(source.starts_with("http://") || source.starts_with("https://")) {
        return std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read dataset file {source}"));
    }

    info!("Fetching dataset from {}", source);
    let response = reqwest::get(source)
        .await
        .context("Failed to reach dataset source")?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Dataset source responded with {}",
            response.status()
        ));
    }

    response
        .text()
        .await
        .context("Failed to read dataset body")
}

/// Keeps the eight home columns of every row and drops the rest.
pub fn parse_homes<R: Read>(reader: R) -> Result<Vec<NewHome>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    csv_reader
        .deserialize::<NewHome>()
        .enumerate()
        .map(|(row, record)| record.with_context(|| format!("Invalid dataset row {}", row + 1)))
        .collect()
}

pub async fn run(config: &Config) -> Result<usize> {
    let source = config.dataset_source();
    let body = fetch_dataset(source).await?;
    let new_homes = parse_homes(body.as_bytes())?;

    db::init_schema(config)?;
    let mut conn = establish_connection(config)?;
    let inserted = db::home::insert_all(&mut conn, &new_homes)
        .context("Bulk insert rolled back")?;
    info!("homes table now holds {} rows", db::home::count(&mut conn)?);

    Ok(inserted)
}
