/// Geographic position in degrees. GeoJSON stores it as `[lon, lat]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

/// Optional per-feature marker styling carried in the GeoJSON properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureStyle {
    pub icon_color: Option<String>,
    pub icon_opacity: Option<f64>,
}

/// A single quarry site.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub name: Option<String>,
    pub description: Option<String>,
    pub position: Position,
    pub style: FeatureStyle,
}

impl Feature {
    pub fn new(name: Option<&str>, lat: f64, lon: f64) -> Self {
        Feature {
            name: name.map(str::to_string),
            description: None,
            position: Position { lat, lon },
            style: FeatureStyle::default(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_style(mut self, color: Option<&str>, opacity: Option<f64>) -> Self {
        self.style = FeatureStyle { icon_color: color.map(str::to_string), icon_opacity: opacity };
        self
    }

    /// Region label embedded in the name, if any.
    pub fn region(&self) -> Option<&str> {
        self.name.as_deref().and_then(crate::region::region_of)
    }
}
