//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built from CLI arguments
//! - written to snapshot JSON
//! - reloaded later to restore parameter values

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Initial values for one Gaussian peak, parsed from `A,xc,yc,s1,s2,theta`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeakSpec {
    pub amplitude: f64,
    pub xc: f64,
    pub yc: f64,
    pub s1: f64,
    pub s2: f64,
    /// Degrees.
    pub theta: f64,
}

impl Default for PeakSpec {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            xc: 0.0,
            yc: 0.0,
            s1: 1.0,
            s2: 1.0,
            theta: 0.0,
        }
    }
}

impl FromStr for PeakSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<f64> = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|e| format!("invalid number '{}': {e}", part.trim()))
            })
            .collect::<Result<_, _>>()?;

        let &[amplitude, xc, yc, s1, s2, theta] = values.as_slice() else {
            return Err(format!(
                "expected 6 comma-separated values A,xc,yc,s1,s2,theta (got {})",
                values.len()
            ));
        };

        Ok(Self {
            amplitude,
            xc,
            yc,
            s1,
            s2,
            theta,
        })
    }
}

/// How the reduced statistic obtains its degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DofSetting {
    /// Leave unset; the reduced statistic is reported as unavailable.
    Unset,
    /// `numpoints - parameter_count`, computed explicitly by the pipeline.
    Auto,
    Fixed(f64),
}

impl FromStr for DofSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "unset" => Ok(DofSetting::Unset),
            "auto" => Ok(DofSetting::Auto),
            other => other
                .parse::<f64>()
                .map(DofSetting::Fixed)
                .map_err(|e| format!("invalid dof '{s}': {e} (use a number, 'auto' or 'none')")),
        }
    }
}

/// Run configuration derived from CLI arguments.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub nx: usize,
    pub ny: usize,
    pub step: f64,
    pub peaks: Vec<PeakSpec>,
    pub background: f64,
    /// Noise scale for synthetic observations; `0` means data == theory.
    pub noise: f64,
    pub seed: u64,
    pub dof: DofSetting,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub save: Option<PathBuf>,
    /// Restore parameter values from a snapshot before evaluating.
    pub restore: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            nx: 41,
            ny: 41,
            step: 0.25,
            peaks: vec![PeakSpec::default()],
            background: 0.0,
            noise: 0.0,
            seed: 42,
            dof: DofSetting::Auto,
            plot: false,
            plot_width: 64,
            plot_height: 32,
            save: None,
            restore: None,
        }
    }
}

/// One named parameter value as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue {
    pub key: String,
    pub name: String,
    #[serde(with = "json_f64")]
    pub value: f64,
}

/// Snapshot file schema written by `io::snapshot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub tool: String,
    pub saved_at: String,
    pub rows: usize,
    pub cols: usize,
    pub numpoints: usize,
    #[serde(with = "json_f64")]
    pub nllf: f64,
    pub dof: Option<f64>,
    #[serde(with = "json_f64::option")]
    pub chisq: Option<f64>,
    pub components: Vec<Vec<ParameterValue>>,
}

/// JSON has no NaN/Inf; non-finite values are written as the strings
/// `"NaN"`, `"inf"` and `"-inf"` and parsed back.
mod json_f64 {
    use serde::de;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    impl Repr {
        fn into_f64<E: de::Error>(self) -> Result<f64, E> {
            match self {
                Repr::Number(v) => Ok(v),
                Repr::Text(s) => s
                    .parse::<f64>()
                    .map_err(|_| E::custom(format!("expected a number, \"NaN\", \"inf\" or \"-inf\" (got \"{s}\")"))),
            }
        }
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if *value > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Repr::deserialize(deserializer)?.into_f64()
    }

    pub mod option {
        use super::Repr;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(v) => super::serialize(v, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<Repr>::deserialize(deserializer)?
                .map(Repr::into_f64)
                .transpose()
        }
    }
}
