//! Errors raised at the edges of the core: decoding the static dataset and
//! validating map configuration. Region matching itself never fails.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("expected a FeatureCollection, found {found}")]
    NotCollection { found: String },

    #[error("feature {index}: {reason}")]
    BadFeature { index: usize, reason: String },

    #[error("feature {index}: unsupported geometry type '{kind}'")]
    UnsupportedGeometry { index: usize, kind: String },

    #[error("collection has {count} features, limit is {max}")]
    TooManyFeatures { count: usize, max: usize },
}

impl DatasetError {
    /// Stable machine-readable code used by the JS result objects.
    pub fn code(&self) -> &'static str {
        match self {
            DatasetError::Json(_) => "json_parse",
            DatasetError::NotCollection { .. } => "not_collection",
            DatasetError::BadFeature { .. } => "bad_feature",
            DatasetError::UnsupportedGeometry { .. } => "unsupported_geometry",
            DatasetError::TooManyFeatures { .. } => "too_many_features",
        }
    }

    /// Index of the offending feature, when the error is about one feature.
    pub fn feature_index(&self) -> Option<usize> {
        match self {
            DatasetError::BadFeature { index, .. }
            | DatasetError::UnsupportedGeometry { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(e: serde_json::Error) -> Self { DatasetError::Json(e.to_string()) }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("parameter '{param}' must be finite")]
    NonFinite { param: &'static str },

    #[error("parameter '{param}' out of range [{min}, {max}], got {got}")]
    OutOfRange { param: &'static str, min: f64, max: f64, got: f64 },

    #[error("parameter '{param}' must not be empty")]
    Empty { param: &'static str },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::NonFinite { .. } => "non_finite",
            ConfigError::OutOfRange { .. } => "out_of_range",
            ConfigError::Empty { .. } => "empty",
        }
    }
}
