use serde::{Deserialize, Serialize};
use std::fmt;

/// The pollutant parameters this toolkit tracks.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Parameter {
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "O3")]
    O3,
}

impl Parameter {
    /// All tracked parameters, in enumeration order.
    pub const ALL: [Parameter; 3] = [Parameter::Pm10, Parameter::Pm25, Parameter::O3];

    /// The parameter code as SINAICA spells it.
    pub fn code(&self) -> &'static str {
        match self {
            Parameter::Pm10 => "PM10",
            Parameter::Pm25 => "PM2.5",
            Parameter::O3 => "O3",
        }
    }

    /// Whether sub-daily readings of this parameter are reported as
    /// 24-hour means (NOM-025-SSA1-2021 convention for particulates).
    pub fn daily_average(&self) -> bool {
        matches!(self, Parameter::Pm10 | Parameter::Pm25)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Parameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Parameter, String> {
        match s {
            "PM10" => Ok(Parameter::Pm10),
            "PM2.5" => Ok(Parameter::Pm25),
            "O3" => Ok(Parameter::O3),
            other => Err(format!("unknown parameter code {:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Parameter;

    #[test]
    fn test_particulates_are_daily_averaged() {
        assert!(Parameter::Pm10.daily_average());
        assert!(Parameter::Pm25.daily_average());
        assert!(!Parameter::O3.daily_average());
    }

    #[test]
    fn test_codes() {
        let codes: Vec<&str> = Parameter::ALL.iter().map(|p| p.code()).collect();
        assert_eq!(codes, ["PM10", "PM2.5", "O3"]);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("PM2.5".parse::<Parameter>(), Ok(Parameter::Pm25));
        assert!("NOx".parse::<Parameter>().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&vec![Parameter::Pm10, Parameter::Pm25, Parameter::O3])
            .unwrap();
        assert_eq!(json, r#"["PM10","PM2.5","O3"]"#);
        let back: Vec<Parameter> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Parameter::ALL.to_vec());
    }
}
