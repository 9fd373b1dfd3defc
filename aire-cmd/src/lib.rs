//! Command implementations for the aire CLI.
//!
//! Provides subcommands for downloading SINAICA air-quality data per
//! station and for inspecting the station catalog.

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use log::{info, warn};
use std::path::PathBuf;

use aire_sinaica::catalog::StationCatalog;
use aire_sinaica::client::SinaicaClient;
use aire_sinaica::parameter::Parameter;
use anyhow::Context;

use crate::config::RunConfig;
use crate::output::OutputFormat;

pub mod config;
pub mod download;
pub mod output;

#[derive(Subcommand)]
pub enum Command {
    /// Download air-quality data and write one artifact per station
    Download {
        /// JSON file overriding the embedded network/station configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// First day of the requested range (YYYY-MM-DD)
        #[arg(long, default_value = "2025-04-01")]
        start: NaiveDate,

        /// Day after the last requested day (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Parameter codes to download (defaults to PM10, PM2.5 and O3)
        #[arg(long = "parameter", value_name = "CODE")]
        parameters: Vec<Parameter>,

        /// Output format for the per-station artifacts
        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,

        /// Directory receiving the per-station artifacts
        #[arg(short, long, default_value = "datos")]
        out_dir: PathBuf,
    },

    /// List the station catalog, fallback entries included
    Stations,
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Download {
            config,
            start,
            end,
            parameters,
            format,
            out_dir,
        } => {
            let networks = match config {
                Some(path) => config::load_networks(&path)?,
                None => config::default_networks(),
            };
            let end = end.unwrap_or_else(|| Local::now().naive_local().date());
            let mut run_config = RunConfig::new(networks, start, end, format, out_dir);
            if !parameters.is_empty() {
                run_config.parameters = parameters;
            }
            let client = SinaicaClient::new().context("failed to build SINAICA client")?;

            let summary = download::run_download(&client, &run_config).await?;
            info!(
                "Download complete: {} stations written, {} skipped, {} without data, {} failed units, {} write failures",
                summary.stations_written,
                summary.stations_skipped,
                summary.stations_empty,
                summary.units_failed,
                summary.write_failures
            );
            if !summary.wrote_any() {
                warn!("Run completed without producing any output");
            }
            Ok(())
        }
        Command::Stations => {
            let catalog = StationCatalog::load();
            for station in catalog.stations() {
                println!(
                    "{:>4}  {:<18} {}",
                    station.station_id, station.network_name, station.station_name
                );
            }
            Ok(())
        }
    }
}
