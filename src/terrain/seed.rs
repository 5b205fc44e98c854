//! Generation seeds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// A numeric seed or a free-form text seed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanetSeed {
    Number(u64),
    Text(String),
}

impl PlanetSeed {
    /// The value fed to the run's RNG. Text is hashed with FNV-1a.
    pub fn to_u64(&self) -> u64 {
        match self {
            PlanetSeed::Number(n) => *n,
            PlanetSeed::Text(s) => s.bytes().fold(FNV_OFFSET, |hash, b| {
                (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
            }),
        }
    }
}

impl Default for PlanetSeed {
    fn default() -> Self {
        PlanetSeed::Text("hello.".to_string())
    }
}

impl From<u64> for PlanetSeed {
    fn from(n: u64) -> Self {
        PlanetSeed::Number(n)
    }
}

impl From<&str> for PlanetSeed {
    fn from(s: &str) -> Self {
        PlanetSeed::Text(s.to_string())
    }
}

impl FromStr for PlanetSeed {
    type Err = std::convert::Infallible;

    /// Decimal integers become numeric seeds; anything else is text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(n) => PlanetSeed::Number(n),
            Err(_) => PlanetSeed::Text(s.to_string()),
        })
    }
}

impl fmt::Display for PlanetSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanetSeed::Number(n) => write!(f, "{n}"),
            PlanetSeed::Text(s) => write!(f, "{s:?}"),
        }
    }
}
