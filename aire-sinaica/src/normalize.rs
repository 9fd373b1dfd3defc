use crate::observation::{DataRecord, Sample, DATE_FORMAT};
use crate::parameter::Parameter;
use chrono::NaiveDate;
use std::collections::HashMap;
use thiserror::Error;

/// Data-quality failure during normalization. The affected segment and
/// parameter are skipped; the station keeps going.
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("malformed measurement date {date:?} for station {station_id}")]
    BadDate { station_id: u32, date: String },
}

/// Convert the raw samples of one (segment, parameter) request into output
/// records.
///
/// Particulate-class parameters are collapsed into one record per
/// (station, calendar day) holding the arithmetic mean of that day's
/// readings; everything else passes through one-to-one, order preserved.
pub fn normalize(
    parameter: Parameter,
    samples: Vec<Sample>,
) -> Result<Vec<DataRecord>, NormalizeError> {
    if parameter.daily_average() {
        daily_means(parameter, &samples)
    } else {
        Ok(samples
            .into_iter()
            .map(|sample| DataRecord {
                station_id: sample.station_id,
                date: sample.timestamp(),
                value: sample.value,
                parameter: String::from(parameter.code()),
            })
            .collect())
    }
}

/// Group samples by (station_id, calendar day) and emit one mean per group,
/// in first-seen order of the groups.
fn daily_means(
    parameter: Parameter,
    samples: &[Sample],
) -> Result<Vec<DataRecord>, NormalizeError> {
    let mut order: Vec<(u32, NaiveDate)> = Vec::new();
    let mut sums: HashMap<(u32, NaiveDate), (f64, u32)> = HashMap::new();
    for sample in samples {
        let date = NaiveDate::parse_from_str(&sample.date, DATE_FORMAT).map_err(|_| {
            NormalizeError::BadDate {
                station_id: sample.station_id,
                date: sample.date.clone(),
            }
        })?;
        let key = (sample.station_id, date);
        let entry = sums.entry(key).or_insert_with(|| {
            order.push(key);
            (0.0, 0)
        });
        entry.0 += sample.value;
        entry.1 += 1;
    }
    Ok(order
        .into_iter()
        .map(|key| {
            let (sum, count) = sums[&key];
            DataRecord {
                station_id: key.0,
                date: key.1.format(DATE_FORMAT).to_string(),
                value: sum / count as f64,
                parameter: String::from(parameter.code()),
            }
        })
        .collect())
}
