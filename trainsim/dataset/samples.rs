use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::DatasetError, ingest::parse_csv, table::Dataset};

const IRIS_CSV: &str = include_str!("samples/iris.csv");
const REVIEWS_CSV: &str = include_str!("samples/reviews.csv");

/// Bundled datasets available without an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleDataset {
    /// Iris flower measurements; target `species`.
    Iris,
    /// Short product reviews; target `sentiment`.
    Reviews,
}

impl SampleDataset {
    /// Every bundled sample.
    pub const ALL: [Self; 2] = [Self::Iris, Self::Reviews];

    /// Identifier used on the command line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Iris => "iris",
            Self::Reviews => "reviews",
        }
    }

    /// One-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Iris => "30 iris flowers, four measurements, three species",
            Self::Reviews => "12 product reviews with rating and sentiment",
        }
    }

    /// Column a user would normally predict.
    #[must_use]
    pub const fn suggested_target(self) -> &'static str {
        match self {
            Self::Iris => "species",
            Self::Reviews => "sentiment",
        }
    }

    /// Raw CSV text.
    #[must_use]
    pub const fn csv(self) -> &'static str {
        match self {
            Self::Iris => IRIS_CSV,
            Self::Reviews => REVIEWS_CSV,
        }
    }

    /// Parses the bundled CSV.
    pub fn load(self) -> Result<Dataset, DatasetError> {
        parse_csv(self.label(), self.csv())
    }
}

impl fmt::Display for SampleDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SampleDataset {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sample| sample.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DatasetError::UnknownSample(s.to_string()))
    }
}
