//! Human-readable duration parsing and formatting utilities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid duration format: {0}")]
    InvalidFormat(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Invalid unit: {0}")]
    InvalidUnit(String),
}

/// Duration in whole seconds with human-readable parsing ("8h", "30m", "90s")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct HumanDuration(pub u64);

impl HumanDuration {
    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn to_std(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.0)
    }

    pub fn to_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.0 as i64)
    }

    pub fn to_human_readable(&self) -> String {
        const UNITS: &[(&str, u64)] = &[("s", 1), ("m", 60), ("h", 3600), ("d", 86400)];

        for &(unit, divisor) in UNITS.iter().rev() {
            if self.0 >= divisor && self.0 % divisor == 0 {
                return format!("{}{}", self.0 / divisor, unit);
            }
        }

        format!("{}s", self.0)
    }
}

impl<'de> Deserialize<'de> for HumanDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct HumanDurationVisitor;

        impl<'de> serde::de::Visitor<'de> for HumanDurationVisitor {
            type Value = HumanDuration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a duration as string (e.g., \"8h\", \"30m\") or integer seconds")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(HumanDuration(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u64::try_from(v)
                    .map(HumanDuration)
                    .map_err(|_| E::custom(format!("negative duration: {}", v)))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse::<HumanDuration>().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_any(HumanDurationVisitor)
    }
}

impl FromStr for HumanDuration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        // Try to parse as plain number of seconds first
        if let Ok(num) = s.parse::<u64>() {
            return Ok(HumanDuration(num));
        }

        // Parse with unit suffix
        let (num_str, unit) = if let Some(pos) = s.find(|c: char| !c.is_ascii_digit()) {
            (&s[..pos], &s[pos..])
        } else {
            return Err(ParseError::InvalidFormat(s.to_string()));
        };

        let num: u64 = num_str.parse()?;

        let multiplier = match unit.trim() {
            "s" | "sec" | "secs" => 1,
            "m" | "min" | "mins" => 60,
            "h" | "hr" | "hrs" => 3600,
            "d" | "day" | "days" => 86400,
            _ => return Err(ParseError::InvalidUnit(unit.to_string())),
        };

        Ok(HumanDuration(num * multiplier))
    }
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_human_readable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!("90".parse::<HumanDuration>().unwrap().as_secs(), 90);
        assert_eq!("90s".parse::<HumanDuration>().unwrap().as_secs(), 90);
        assert_eq!("90secs".parse::<HumanDuration>().unwrap().as_secs(), 90);
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!("30m".parse::<HumanDuration>().unwrap().as_secs(), 30 * 60);
        assert_eq!("30min".parse::<HumanDuration>().unwrap().as_secs(), 30 * 60);
    }

    #[test]
    fn test_parse_hours_and_days() {
        assert_eq!("8h".parse::<HumanDuration>().unwrap().as_secs(), 8 * 3600);
        assert_eq!("2d".parse::<HumanDuration>().unwrap().as_secs(), 2 * 86400);
    }

    #[test]
    fn test_parse_invalid_unit() {
        assert!(matches!(
            "5fortnights".parse::<HumanDuration>(),
            Err(ParseError::InvalidUnit(_))
        ));
    }

    #[test]
    fn test_to_human_readable() {
        assert_eq!(HumanDuration(8 * 3600).to_human_readable(), "8h");
        assert_eq!(HumanDuration(30 * 60).to_human_readable(), "30m");
        assert_eq!(HumanDuration(90).to_human_readable(), "90s");
        assert_eq!(HumanDuration(86400).to_human_readable(), "1d");
    }

    #[test]
    fn test_deserialize_string() {
        let json = r#"{"wait": "8h"}"#;
        #[derive(Deserialize)]
        struct TestStruct {
            wait: HumanDuration,
        }
        let parsed: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.wait.as_secs(), 8 * 3600);
    }

    #[test]
    fn test_deserialize_number() {
        let json = r#"{"wait": 1800}"#;
        #[derive(Deserialize)]
        struct TestStruct {
            wait: HumanDuration,
        }
        let parsed: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.wait.as_secs(), 1800);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", HumanDuration(1800)), "30m");
    }
}
