use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::KsefError;

/// Version of the KSeF structured invoice schema (`FA`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaVariant {
    /// FA(1), the first production schema.
    Fa1,
    /// FA(2).
    Fa2,
    /// FA(3).
    Fa3,
}

impl SchemaVariant {
    pub const ALL: [SchemaVariant; 3] = [Self::Fa1, Self::Fa2, Self::Fa3];

    /// The literal carried in `KodFormularza@kodSystemowy`.
    pub fn kod_systemowy(&self) -> &'static str {
        match self {
            Self::Fa1 => "FA (1)",
            Self::Fa2 => "FA (2)",
            Self::Fa3 => "FA (3)",
        }
    }

    /// Short name, e.g. `FA2`.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Fa1 => "FA1",
            Self::Fa2 => "FA2",
            Self::Fa3 => "FA3",
        }
    }
}

impl FromStr for SchemaVariant {
    type Err = KsefError;

    /// Exact match only: no trimming, no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.kod_systemowy() == s)
            .ok_or_else(|| KsefError::UnsupportedVariant(s.to_string()))
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kod_systemowy())
    }
}
