pub mod basemap;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod limits;
pub mod marker;
pub mod model;
pub mod region;

pub use config::MapConfig;
pub use dataset::Dataset;
pub use error::{ConfigError, DatasetError};
pub use filter::{filter_features, filter_options, FilterController, FilterOption, FilterUi, Renderer, Selection};
pub use marker::MarkerSpec;
pub use model::{Feature, FeatureStyle, Position};
pub use region::{extract_regions, region_of, RegionIndex, RegionLabel};
