use serde::{Deserialize, Serialize};

/// Date format used for SINAICA measurement days and API query parameters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One raw sub-daily measurement row as returned by the SINAICA service.
///
/// The parameter is implicit from the request context. An empty row set for
/// a request is an explicit absence, not an error.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub station_id: u32,
    /// Measurement day, `YYYY-MM-DD`
    pub date: String,
    /// Hour of day, 0-23
    pub hour: u32,
    pub value: f64,
}

impl Sample {
    /// Render the full sub-daily timestamp of this reading.
    pub fn timestamp(&self) -> String {
        format!("{} {:02}:00", self.date, self.hour)
    }
}

/// One consolidated output row: either a raw reading carried through
/// unchanged (`date` holds the sub-daily timestamp) or a daily aggregate
/// (`date` holds the calendar day).
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DataRecord {
    pub station_id: u32,
    pub date: String,
    pub value: f64,
    #[serde(rename = "parametro")]
    pub parameter: String,
}

#[cfg(test)]
mod tests {
    use super::Sample;

    #[test]
    fn test_timestamp_pads_the_hour() {
        let sample = Sample {
            station_id: 265,
            date: String::from("2025-04-01"),
            hour: 7,
            value: 41.0,
        };
        assert_eq!(sample.timestamp(), "2025-04-01 07:00");
    }
}
