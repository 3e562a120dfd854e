use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a fetched payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceMode {
    /// Fresh data from the statistics API.
    #[default]
    Live,
    /// The API failed and a bundled snapshot was used.
    Fallback,
    /// The API failed and no snapshot exists; the payload is empty.
    Unavailable,
}

impl DataSourceMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Fallback => "fallback",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for DataSourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A payload tagged with the mode of the fetch that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sourced<T> {
    pub mode: DataSourceMode,
    pub payload: T,
}

impl<T> Sourced<T> {
    pub fn live(payload: T) -> Self {
        Self {
            mode: DataSourceMode::Live,
            payload,
        }
    }

    pub fn fallback(payload: T) -> Self {
        Self {
            mode: DataSourceMode::Fallback,
            payload,
        }
    }

    pub fn unavailable(payload: T) -> Self {
        Self {
            mode: DataSourceMode::Unavailable,
            payload,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            mode: self.mode,
            payload: f(self.payload),
        }
    }

    pub fn into_payload(self) -> T {
        self.payload
    }
}
