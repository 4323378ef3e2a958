use serde::{Deserialize, Serialize};

use crate::model::Feature;

pub const DEFAULT_FILL: &str = "#a52714";
pub const DEFAULT_FILL_OPACITY: f64 = 0.8;

/// Circle styling shared by every quarry marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub radius: f64,
    pub outline: String,
    pub weight: f64,
    pub opacity: f64,
    pub default_fill: String,
    pub default_fill_opacity: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle {
            radius: 12.0,
            outline: "#000".to_string(),
            weight: 1.0,
            opacity: 1.0,
            default_fill: DEFAULT_FILL.to_string(),
            default_fill_opacity: DEFAULT_FILL_OPACITY,
        }
    }
}

/// Pick-axe icon drawn over the circle; not interactive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSpec {
    pub url: String,
    pub size: [f64; 2],
    pub anchor: [f64; 2],
    pub popup_anchor: [f64; 2],
    pub z_index_offset: i32,
}

impl Default for IconSpec {
    fn default() -> Self {
        IconSpec {
            url: "quarry-icon.png".to_string(),
            size: [16.0, 16.0],
            anchor: [8.0, 8.0],
            popup_anchor: [0.0, -8.0],
            z_index_offset: 1000,
        }
    }
}

/// Everything a renderer needs to draw one quarry.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
    pub fill: String,
    pub fill_opacity: f64,
    pub outline: String,
    pub weight: f64,
    pub opacity: f64,
    pub popup: Option<String>,
}

impl MarkerSpec {
    pub fn for_feature(f: &Feature, style: &MarkerStyle) -> Self {
        MarkerSpec {
            lat: f.position.lat,
            lon: f.position.lon,
            radius: style.radius,
            fill: f
                .style
                .icon_color
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| style.default_fill.clone()),
            fill_opacity: f.style.icon_opacity.unwrap_or(style.default_fill_opacity),
            outline: style.outline.clone(),
            weight: style.weight,
            opacity: style.opacity,
            popup: f.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_feature_has_no_style() {
        let f = Feature::new(Some("Region: North"), 32.1, 35.2);
        let m = MarkerSpec::for_feature(&f, &MarkerStyle::default());
        assert_eq!((m.lat, m.lon), (32.1, 35.2));
        assert_eq!(m.fill, "#a52714");
        assert_eq!(m.fill_opacity, 0.8);
        assert_eq!(m.radius, 12.0);
        assert_eq!(m.popup, None);
    }

    #[test]
    fn feature_style_and_description_win() {
        let f = Feature::new(None, 0.0, 0.0)
            .with_style(Some("#0288d1"), Some(0.0))
            .with_description("<p>Closed 1998</p>");
        let m = MarkerSpec::for_feature(&f, &MarkerStyle::default());
        assert_eq!(m.fill, "#0288d1");
        assert_eq!(m.fill_opacity, 0.0);
        assert_eq!(m.popup.as_deref(), Some("<p>Closed 1998</p>"));
    }

    #[test]
    fn empty_color_falls_back_but_zero_opacity_stays() {
        let f = Feature::new(None, 0.0, 0.0).with_style(Some(""), Some(0.0));
        let m = MarkerSpec::for_feature(&f, &MarkerStyle::default());
        assert_eq!(m.fill, DEFAULT_FILL);
        assert_eq!(m.fill_opacity, 0.0);
    }
}
