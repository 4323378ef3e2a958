//! Base tile layers and the floating layer panel.

use serde::{Deserialize, Serialize};

pub const OVERLAY_LABEL: &str = "Quarries";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseLayer {
    #[default]
    Street,
    Satellite,
}

impl BaseLayer {
    pub const ALL: [BaseLayer; 2] = [BaseLayer::Street, BaseLayer::Satellite];

    /// Label shown in the layer control.
    pub fn label(self) -> &'static str {
        match self {
            BaseLayer::Street => "Base Map",
            BaseLayer::Satellite => "Satellite",
        }
    }

    /// Accepts control labels and short names, ignoring case.
    pub fn from_label(s: &str) -> Option<BaseLayer> {
        let s = s.trim();
        BaseLayer::ALL.into_iter().find(|b| {
            b.label().eq_ignore_ascii_case(s)
                || match b {
                    BaseLayer::Street => s.eq_ignore_ascii_case("street"),
                    BaseLayer::Satellite => s.eq_ignore_ascii_case("satellite"),
                }
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileSource {
    pub url: String,
    pub attribution: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSources {
    pub street: TileSource,
    pub satellite: TileSource,
}

impl Default for TileSources {
    fn default() -> Self {
        TileSources {
            street: TileSource {
                url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
                attribution: "&copy; OpenStreetMap contributors".to_string(),
            },
            satellite: TileSource {
                url: "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
                    .to_string(),
                attribution: "Imagery &copy; Esri".to_string(),
            },
        }
    }
}

impl TileSources {
    pub fn get(&self, layer: BaseLayer) -> &TileSource {
        match layer {
            BaseLayer::Street => &self.street,
            BaseLayer::Satellite => &self.satellite,
        }
    }
}

/// Placement of the layer panel wrapper, in CSS pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelPlacement {
    pub top: i32,
    pub left: i32,
    pub z_index: i32,
}

impl Default for PanelPlacement {
    fn default() -> Self { PanelPlacement { top: 160, left: 10, z_index: 1001 } }
}

/// Visibility of the layer panel and the active base layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerPanel {
    visible: bool,
    base: BaseLayer,
}

impl LayerPanel {
    pub fn new() -> Self { LayerPanel::default() }

    pub fn is_visible(&self) -> bool { self.visible }

    /// Flip visibility; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// CSS `display` value for the wrapper.
    pub fn display(&self) -> &'static str { if self.visible { "block" } else { "none" } }

    pub fn base(&self) -> BaseLayer { self.base }

    /// Returns true when the base layer changed.
    pub fn set_base(&mut self, layer: BaseLayer) -> bool {
        let changed = self.base != layer;
        self.base = layer;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_starts_hidden_and_toggles() {
        let mut p = LayerPanel::new();
        assert_eq!(p.display(), "none");
        assert!(p.toggle());
        assert_eq!(p.display(), "block");
        assert!(!p.toggle());
        assert_eq!(p.display(), "none");
    }

    #[test]
    fn base_layer_labels() {
        assert_eq!(BaseLayer::from_label("Base Map"), Some(BaseLayer::Street));
        assert_eq!(BaseLayer::from_label(" satellite "), Some(BaseLayer::Satellite));
        assert_eq!(BaseLayer::from_label("STREET"), Some(BaseLayer::Street));
        assert_eq!(BaseLayer::from_label("terrain"), None);
    }

    #[test]
    fn set_base_reports_change() {
        let mut p = LayerPanel::new();
        assert_eq!(p.base(), BaseLayer::Street);
        assert!(!p.set_base(BaseLayer::Street));
        assert!(p.set_base(BaseLayer::Satellite));
        assert_eq!(p.base(), BaseLayer::Satellite);
    }
}
