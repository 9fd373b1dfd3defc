//! Run configuration: which networks and stations to download, over which
//! date range, in which output format.

use crate::output::OutputFormat;
use aire_sinaica::parameter::Parameter;
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Embedded default network configuration. Station names must match the
/// SINAICA catalog exactly.
pub static REDES_JSON: &str = include_str!("../fixtures/redes.json");

/// Politeness delay between consecutive SINAICA requests.
pub const REQUEST_DELAY: Duration = Duration::from_millis(500);

/// One monitoring network and its active stations, in download order.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(rename = "red")]
    pub network: String,
    #[serde(rename = "estaciones")]
    pub stations: Vec<String>,
}

/// Everything one run needs, passed into the orchestrator at construction.
/// There is no process-wide configuration state.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub networks: Vec<NetworkConfig>,
    /// Parameters to download, in output order.
    pub parameters: Vec<Parameter>,
    /// First requested day.
    pub start: NaiveDate,
    /// Day after the last requested day.
    pub end: NaiveDate,
    pub format: OutputFormat,
    pub out_dir: PathBuf,
    pub request_delay: Duration,
}

impl RunConfig {
    pub fn new(
        networks: Vec<NetworkConfig>,
        start: NaiveDate,
        end: NaiveDate,
        format: OutputFormat,
        out_dir: PathBuf,
    ) -> RunConfig {
        RunConfig {
            networks,
            parameters: Parameter::ALL.to_vec(),
            start,
            end,
            format,
            out_dir,
            request_delay: REQUEST_DELAY,
        }
    }
}

/// Networks from the embedded default configuration.
pub fn default_networks() -> Vec<NetworkConfig> {
    if let Ok(networks) = serde_json::from_str(REDES_JSON) {
        networks
    } else {
        panic!("failed to parse embedded network configuration")
    }
}

/// Networks from an operator-supplied JSON file.
pub fn load_networks(path: &Path) -> anyhow::Result<Vec<NetworkConfig>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read network configuration {}", path.display()))?;
    let networks: Vec<NetworkConfig> = serde_json::from_str(&text)
        .with_context(|| format!("invalid network configuration {}", path.display()))?;
    anyhow::ensure!(
        !networks.is_empty(),
        "network configuration {} lists no networks",
        path.display()
    );
    Ok(networks)
}
