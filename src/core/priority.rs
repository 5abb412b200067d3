//! Priority and change-frequency hints for sitemap consumers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Relative importance of a URL within the site (0.0 ..= 1.0)
///
/// Out-of-range values are clamped; NaN becomes the default.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Priority(f32);

impl Priority {
    pub const HIGHEST: Self = Self(1.0);
    pub const DEFAULT: Self = Self(0.5);

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::DEFAULT;
        }
        Self(value.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Round to one decimal so JSON output stays stable
        serializer.serialize_f64((f64::from(self.0) * 10.0).round() / 10.0)
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[allow(clippy::cast_possible_truncation)]
        f64::deserialize(deserializer).map(|v| Self::new(v as f32))
    }
}

/// How often the content at a URL is expected to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFreq {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            other => Err(format!("unknown change frequency `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_clamps() {
        assert_eq!(Priority::new(1.7).value(), 1.0);
        assert_eq!(Priority::new(-0.2).value(), 0.0);
        assert_eq!(Priority::new(f32::NAN), Priority::DEFAULT);
        assert_eq!(Priority::new(0.8).value(), 0.8);
    }

    #[test]
    fn test_priority_serializes_rounded() {
        assert_eq!(serde_json::to_string(&Priority::new(0.7)).unwrap(), "0.7");
        assert_eq!(Priority::new(0.7).to_string(), "0.7");
        assert_eq!(Priority::HIGHEST.to_string(), "1.0");
    }

    #[test]
    fn test_changefreq_parsing() {
        for (input, expected) in [
            ("always", ChangeFreq::Always),
            ("Hourly", ChangeFreq::Hourly),
            (" daily ", ChangeFreq::Daily),
            ("WEEKLY", ChangeFreq::Weekly),
            ("monthly", ChangeFreq::Monthly),
            ("yearly", ChangeFreq::Yearly),
            ("never", ChangeFreq::Never),
        ] {
            assert_eq!(input.parse::<ChangeFreq>(), Ok(expected), "failed for {input}");
        }
        assert!("fortnightly".parse::<ChangeFreq>().is_err());
    }

    #[test]
    fn test_changefreq_serde() {
        assert_eq!(serde_json::to_string(&ChangeFreq::Daily).unwrap(), "\"daily\"");
        let parsed: ChangeFreq = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(parsed, ChangeFreq::Monthly);
    }
}
