use crate::station::{Station, CSV_OBJECT};
use thiserror::Error;

/// Errors from resolving a configured (network, station) pair.
///
/// `NotFound` is recoverable (the caller skips the station); `Ambiguous`
/// means the catalog itself is misconfigured and the run must not start.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("station not found in catalog: {network_name} / {station_name}")]
    NotFound {
        network_name: String,
        station_name: String,
    },
    #[error("{matches} catalog entries match {network_name} / {station_name}")]
    Ambiguous {
        network_name: String,
        station_name: String,
        matches: usize,
    },
}

/// Run-scoped snapshot of the station catalog.
///
/// Fallback entries for stations missing from the upstream snapshot are
/// injected at load time and live only in memory; nothing is persisted back.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    stations: Vec<Station>,
}

// TODO: confirm station_id 501 against the SINAICA portal once
// "Primaria Ignacio Zaragoza" lands in the official catalog.
fn fallback_stations() -> Vec<Station> {
    vec![Station {
        station_id: 501,
        station_name: String::from("Primaria Ignacio Zaragoza"),
        network_name: String::from("Pachuca"),
        latitude: 20.12,
        longitude: -98.74,
    }]
}

impl StationCatalog {
    /// Load the catalog from the embedded snapshot and inject fallbacks.
    pub fn load() -> StationCatalog {
        if let Ok(stations) = Station::parse_station_csv(CSV_OBJECT) {
            StationCatalog::from_stations(stations)
        } else {
            panic!("failed to parse embedded station csv")
        }
    }

    /// Build a catalog from an explicit snapshot and inject fallbacks.
    pub fn from_stations(stations: Vec<Station>) -> StationCatalog {
        let mut catalog = StationCatalog { stations };
        catalog.ensure_fallback_stations();
        catalog
    }

    /// Append each fallback station unless an entry with the same
    /// (network_name, station_name) already exists. Running this twice
    /// adds nothing.
    fn ensure_fallback_stations(&mut self) {
        for fallback in fallback_stations() {
            let present = self.stations.iter().any(|s| {
                s.station_name == fallback.station_name
                    && s.network_name == fallback.network_name
            });
            if !present {
                self.stations.push(fallback);
            }
        }
    }

    /// Resolve a (network, station) name pair with an exact, case-sensitive
    /// match on both names.
    pub fn resolve(
        &self,
        network_name: &str,
        station_name: &str,
    ) -> Result<&Station, CatalogError> {
        let matches: Vec<&Station> = self
            .stations
            .iter()
            .filter(|s| s.network_name == network_name && s.station_name == station_name)
            .collect();
        match matches.len() {
            1 => Ok(matches[0]),
            0 => Err(CatalogError::NotFound {
                network_name: String::from(network_name),
                station_name: String::from(station_name),
            }),
            n => Err(CatalogError::Ambiguous {
                network_name: String::from(network_name),
                station_name: String::from(station_name),
                matches: n,
            }),
        }
    }

    /// All catalog entries, fallbacks included.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }
}
