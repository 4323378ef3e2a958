use serde::{Deserialize, Serialize};

use crate::basemap::{PanelPlacement, TileSources};
use crate::error::ConfigError;
use crate::marker::{IconSpec, MarkerStyle};

pub const MAX_ZOOM: f64 = 22.0;

/// Ids of the page elements the map binds to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomIds {
    pub map: String,
    pub filter_form: String,
    pub layer_wrapper: String,
    pub layer_toggle: String,
}

impl Default for DomIds {
    fn default() -> Self {
        DomIds {
            map: "map".to_string(),
            filter_form: "region-form".to_string(),
            layer_wrapper: "layer-box-wrapper".to_string(),
            layer_toggle: "custom-layer-toggle".to_string(),
        }
    }
}

/// Map setup. Every field has a default, so callers may pass any subset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub zoom: f64,
    pub dom: DomIds,
    pub tiles: TileSources,
    pub marker: MarkerStyle,
    pub icon: IconSpec,
    pub panel: PanelPlacement,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            center: [32.0, 35.3],
            zoom: 9.0,
            dom: DomIds::default(),
            tiles: TileSources::default(),
            marker: MarkerStyle::default(),
            icon: IconSpec::default(),
            panel: PanelPlacement::default(),
        }
    }
}

impl MapConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [lat, lon] = self.center;
        check_range("center.lat", lat, -90.0, 90.0)?;
        check_range("center.lon", lon, -180.0, 180.0)?;
        check_range("zoom", self.zoom, 0.0, MAX_ZOOM)?;
        check_range("marker.radius", self.marker.radius, 0.0, 1000.0)?;
        check_range("marker.default_fill_opacity", self.marker.default_fill_opacity, 0.0, 1.0)?;
        if self.dom.map.trim().is_empty() {
            return Err(ConfigError::Empty { param: "dom.map" });
        }
        Ok(())
    }
}

fn check_range(param: &'static str, v: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if !v.is_finite() {
        return Err(ConfigError::NonFinite { param });
    }
    if v < min || v > max {
        return Err(ConfigError::OutOfRange { param, min, max, got: v });
    }
    Ok(())
}
