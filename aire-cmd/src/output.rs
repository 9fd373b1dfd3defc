//! Per-station artifact writing.

use aire_sinaica::dataset::StationDataset;
use anyhow::Context;
use clap::ValueEnum;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// UTF-8 byte order mark; spreadsheet tools need it to decode accented
/// station names correctly.
const BOM: &[u8] = b"\xef\xbb\xbf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// Result of writing one station's dataset. `NoData` means no artifact was
/// created because the dataset was empty, which is not an error.
#[derive(Debug, PartialEq)]
pub enum WriteOutcome {
    Written(PathBuf),
    NoData,
}

/// Derive a filesystem-safe artifact base name from a (network, station)
/// pair: spaces become underscores, periods are dropped. Collision-freedom
/// across the configured station set is a configuration invariant.
pub fn safe_file_name(network_name: &str, station_name: &str) -> String {
    format!("{}_{}", network_name, station_name)
        .replace(' ', "_")
        .replace('.', "")
}

/// Serialize a station's consolidated records, in order, to
/// `calidad_aire_<name>.<ext>` under `out_dir`. The artifact is staged in a
/// temp file and renamed into place so a reader never sees a partial write.
pub fn write_station_dataset(
    out_dir: &Path,
    network_name: &str,
    station_name: &str,
    dataset: &StationDataset,
    format: OutputFormat,
) -> anyhow::Result<WriteOutcome> {
    if dataset.is_empty() {
        return Ok(WriteOutcome::NoData);
    }

    let file_name = format!(
        "calidad_aire_{}.{}",
        safe_file_name(network_name, station_name),
        format.extension()
    );
    let path = out_dir.join(file_name);

    let mut tmp = NamedTempFile::new_in(out_dir)
        .with_context(|| format!("failed to stage output in {}", out_dir.display()))?;
    match format {
        OutputFormat::Csv => {
            tmp.write_all(BOM)?;
            let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
            for record in dataset.records() {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        OutputFormat::Json => {
            serde_json::to_writer(tmp.as_file_mut(), dataset.records())?;
        }
    }
    tmp.persist(&path)
        .with_context(|| format!("failed to persist {}", path.display()))?;

    Ok(WriteOutcome::Written(path))
}

#[cfg(test)]
mod tests {
    use super::{safe_file_name, write_station_dataset, OutputFormat, WriteOutcome, BOM};
    use aire_sinaica::dataset::StationDataset;
    use aire_sinaica::observation::DataRecord;

    fn record(date: &str, value: f64) -> DataRecord {
        DataRecord {
            station_id: 265,
            date: String::from(date),
            value,
            parameter: String::from("PM10"),
        }
    }

    fn dataset() -> StationDataset {
        let mut dataset = StationDataset::new();
        dataset.append(vec![
            record("2025-04-02", 41.5),
            record("2025-04-01", 38.0),
            record("2025-05-01", 29.25),
        ]);
        dataset
    }

    #[test]
    fn test_safe_file_name_replaces_spaces() {
        assert_eq!(
            safe_file_name("Toluca", "Toluca Centro"),
            "Toluca_Toluca_Centro"
        );
        assert_eq!(
            safe_file_name("San Juan del Rio", "San Juan del Río"),
            "San_Juan_del_Rio_San_Juan_del_Río"
        );
    }

    #[test]
    fn test_safe_file_name_strips_periods() {
        assert_eq!(safe_file_name("Pachuca", "Col. Centro"), "Pachuca_Col_Centro");
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = write_station_dataset(
            dir.path(),
            "Toluca",
            "Metepec",
            &dataset(),
            OutputFormat::Csv,
        )
        .unwrap();
        let path = match outcome {
            WriteOutcome::Written(path) => path,
            WriteOutcome::NoData => panic!("expected an artifact"),
        };
        assert!(path.ends_with("calidad_aire_Toluca_Metepec.csv"));

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], BOM);

        let mut rdr = csv::Reader::from_reader(&bytes[3..]);
        assert_eq!(
            rdr.headers().unwrap(),
            &csv::StringRecord::from(vec!["station_id", "date", "value", "parametro"])
        );
        let records: Vec<DataRecord> = rdr
            .deserialize()
            .collect::<Result<Vec<DataRecord>, csv::Error>>()
            .unwrap();
        assert_eq!(records, dataset().into_records());
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = write_station_dataset(
            dir.path(),
            "Toluca",
            "Metepec",
            &dataset(),
            OutputFormat::Json,
        )
        .unwrap();
        let path = match outcome {
            WriteOutcome::Written(path) => path,
            WriteOutcome::NoData => panic!("expected an artifact"),
        };
        assert!(path.ends_with("calidad_aire_Toluca_Metepec.json"));

        let text = std::fs::read_to_string(&path).unwrap();
        let records: Vec<DataRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(records, dataset().into_records());
        // Record-array document keyed by field names, non-ASCII intact.
        assert!(text.starts_with('['));
        assert!(text.contains("\"parametro\":\"PM10\""));
    }

    #[test]
    fn test_empty_dataset_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = write_station_dataset(
            dir.path(),
            "Toluca",
            "Metepec",
            &StationDataset::new(),
            OutputFormat::Csv,
        )
        .unwrap();
        assert_eq!(outcome, WriteOutcome::NoData);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
