use serde::{Deserialize, Serialize};

/// IWF age groups an athlete falls into for a given competition year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct AgeCategories {
    #[serde(default)]
    pub is_youth: bool,
    #[serde(default)]
    pub is_junior: bool,
    #[serde(default)]
    pub is_senior: bool,
    #[serde(default)]
    pub is_master: bool,
}

impl AgeCategories {
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.is_youth {
            labels.push("Youth");
        }
        if self.is_junior {
            labels.push("Junior");
        }
        if self.is_senior {
            labels.push("Senior");
        }
        if self.is_master {
            labels.push("Master");
        }
        labels
    }
}

/// One page of a list endpoint. `next`/`previous` are absolute URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// A `{"detail": "..."}` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Detail {
    pub detail: String,
}

impl Detail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
