//! Download orchestration: networks → stations → month spans → parameters.
//!
//! Failures are contained to the smallest unit that produced them. A
//! station missing from the catalog is skipped; a failed retrieval or a
//! data-quality problem discards one (span, parameter) unit; nothing below
//! the station level ever aborts the run.

use crate::config::RunConfig;
use crate::output::{self, WriteOutcome};
use aire_sinaica::catalog::{CatalogError, StationCatalog};
use aire_sinaica::client::SampleSource;
use aire_sinaica::dataset::StationDataset;
use aire_sinaica::date_range::MonthRange;
use aire_sinaica::normalize::normalize;
use anyhow::Context;
use log::{info, warn};

/// What a completed run did. A run with `stations_written == 0` completed
/// in a degraded state, which is distinguishable from a crash.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunSummary {
    pub stations_written: usize,
    pub stations_skipped: usize,
    pub stations_empty: usize,
    pub units_failed: usize,
    pub write_failures: usize,
}

impl RunSummary {
    pub fn wrote_any(&self) -> bool {
        self.stations_written > 0
    }
}

/// Reject configurations the catalog cannot answer unambiguously, before
/// the first request goes out. `NotFound` stays recoverable and is handled
/// per station during the run.
fn validate_catalog(catalog: &StationCatalog, config: &RunConfig) -> anyhow::Result<()> {
    for network in &config.networks {
        for station_name in &network.stations {
            if let Err(e @ CatalogError::Ambiguous { .. }) =
                catalog.resolve(&network.network, station_name)
            {
                return Err(e.into());
            }
        }
    }
    Ok(())
}

/// Download every configured (network, station) pair and write one
/// artifact per station that produced data.
pub async fn run_download<S: SampleSource>(
    source: &S,
    config: &RunConfig,
) -> anyhow::Result<RunSummary> {
    let catalog = StationCatalog::load();
    validate_catalog(&catalog, config)?;
    std::fs::create_dir_all(&config.out_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.out_dir.display()
        )
    })?;

    let mut summary = RunSummary::default();

    for network in &config.networks {
        for station_name in &network.stations {
            let station_id = match catalog.resolve(&network.network, station_name) {
                Ok(station) => station.station_id,
                Err(e) => {
                    warn!("[{}] Skipping {}: {}", network.network, station_name, e);
                    summary.stations_skipped += 1;
                    continue;
                }
            };

            let mut dataset = StationDataset::new();

            for span in MonthRange(config.start, config.end) {
                for &parameter in &config.parameters {
                    info!(
                        "[{}] Fetching {} for {} ({} to {})",
                        network.network, parameter, station_name, span.start, span.end
                    );
                    let samples = source.fetch(station_id, parameter, span).await;

                    if !samples.is_empty() {
                        match normalize(parameter, samples) {
                            Ok(records) => dataset.append(records),
                            Err(e) => {
                                warn!(
                                    "[{}] Discarding {} for {} ({} to {}): {}",
                                    network.network,
                                    parameter,
                                    station_name,
                                    span.start,
                                    span.end,
                                    e
                                );
                                summary.units_failed += 1;
                            }
                        }
                    }

                    // Be polite to the SINAICA server
                    if !config.request_delay.is_zero() {
                        tokio::time::sleep(config.request_delay).await;
                    }
                }
            }

            match output::write_station_dataset(
                &config.out_dir,
                &network.network,
                station_name,
                &dataset,
                config.format,
            ) {
                Ok(WriteOutcome::Written(path)) => {
                    info!(
                        "[{}] Wrote {} records for {} to {}",
                        network.network,
                        dataset.len(),
                        station_name,
                        path.display()
                    );
                    summary.stations_written += 1;
                }
                Ok(WriteOutcome::NoData) => {
                    warn!(
                        "[{}] No data for {} in the requested range",
                        network.network, station_name
                    );
                    summary.stations_empty += 1;
                }
                Err(e) => {
                    warn!(
                        "[{}] Failed to write output for {}: {}",
                        network.network, station_name, e
                    );
                    summary.write_failures += 1;
                }
            }
        }
    }

    Ok(summary)
}
