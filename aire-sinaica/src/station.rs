use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Embedded CSV snapshot of the SINAICA station catalog, filtered to the
/// networks this toolkit tracks.
pub static CSV_OBJECT: &str = include_str!("../fixtures/estaciones.csv");

/// Represents a SINAICA air-quality monitoring station.
///
/// A station name is only unique within its network; the pair
/// (network_name, station_name) identifies a station.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    /// SINAICA station identifier
    pub station_id: u32,
    /// Station name as it appears in the SINAICA catalog
    pub station_name: String,
    /// Monitoring network the station belongs to
    pub network_name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Station {
    /// Parse a CSV string of station data into a vector of Stations.
    ///
    /// Expected CSV columns: station_id, station_name, network_name, latitude, longitude
    pub fn parse_station_csv(csv_object: &str) -> Result<Vec<Station>, std::io::Error> {
        let mut station_list: Vec<Station> = Vec::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let record = row?;
            let station_id = record
                .get(0)
                .unwrap_or("0")
                .trim()
                .parse::<u32>()
                .unwrap_or(0);
            let station_name = String::from(
                record
                    .get(1)
                    .expect("station_name parse fail"),
            );
            let network_name = String::from(
                record
                    .get(2)
                    .expect("network_name parse fail"),
            );
            let latitude = record
                .get(3)
                .unwrap_or("0.0")
                .trim()
                .parse::<f64>()
                .unwrap_or(0.0);
            let longitude = record
                .get(4)
                .unwrap_or("0.0")
                .trim()
                .parse::<f64>()
                .unwrap_or(0.0);
            let station = Station {
                station_id,
                station_name,
                network_name,
                latitude,
                longitude,
            };
            station_list.push(station);
        }
        Ok(station_list)
    }
}

#[cfg(test)]
mod tests {
    use super::{Station, CSV_OBJECT};

    #[test]
    fn test_parse_station_csv() {
        let csv_data = "\
station_id,station_name,network_name,latitude,longitude
265,Metepec,Toluca,19.2542,-99.6028
402,Apizaco,Tlaxcala,19.4167,-98.1436
";
        let stations = Station::parse_station_csv(csv_data).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].station_id, 265);
        assert_eq!(stations[0].station_name, "Metepec");
        assert_eq!(stations[0].network_name, "Toluca");
        assert!((stations[0].latitude - 19.2542).abs() < f64::EPSILON);
        assert!((stations[0].longitude - (-99.6028)).abs() < f64::EPSILON);
        assert_eq!(stations[1].station_id, 402);
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv_data = "station_id,station_name,network_name,latitude,longitude\n";
        let stations = Station::parse_station_csv(csv_data).unwrap();
        assert_eq!(stations.len(), 0);
    }

    #[test]
    fn test_embedded_snapshot_parses() {
        let stations = Station::parse_station_csv(CSV_OBJECT).unwrap();
        assert_eq!(stations.len(), 17);
        assert!(stations
            .iter()
            .any(|s| s.station_name == "Oxtotitlán" && s.network_name == "Toluca"));
    }
}
