use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::error::DatasetError;
use crate::limits;
use crate::model::{Feature, FeatureStyle, Position};

/// The static quarry collection. Immutable once decoded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    features: Vec<Feature>,
    skipped: usize,
}

impl Dataset {
    pub fn new(features: Vec<Feature>) -> Self { Dataset { features, skipped: 0 } }

    pub fn features(&self) -> &[Feature] { &self.features }
    pub fn into_features(self) -> Vec<Feature> { self.features }
    pub fn len(&self) -> usize { self.features.len() }
    pub fn is_empty(&self) -> bool { self.features.is_empty() }
    pub fn iter(&self) -> std::slice::Iter<'_, Feature> { self.features.iter() }

    /// Features dropped by lenient decoding.
    pub fn skipped(&self) -> usize { self.skipped }

    pub fn from_json_str(text: &str) -> Result<Self, DatasetError> {
        let v: Value = serde_json::from_str(text)?;
        Self::from_json_value_strict(v)
    }

    /// Decode a GeoJSON FeatureCollection, failing on the first bad feature.
    pub fn from_json_value_strict(v: Value) -> Result<Self, DatasetError> {
        let raw = collection_features(&v)?;
        let mut features = Vec::with_capacity(raw.len());
        for (i, f) in raw.iter().enumerate() {
            features.push(decode_feature(i, f)?);
        }
        info!(features = features.len(), "decoded quarry dataset");
        Ok(Dataset::new(features))
    }

    /// Decode a GeoJSON FeatureCollection, skipping features that fail to
    /// decode. Only a malformed container is an error.
    pub fn from_json_value(v: Value) -> Result<Self, DatasetError> {
        let raw = collection_features(&v)?;
        let mut features = Vec::with_capacity(raw.len());
        let mut skipped = 0usize;
        for (i, f) in raw.iter().enumerate() {
            match decode_feature(i, f) {
                Ok(feat) => features.push(feat),
                Err(e) => {
                    warn!(index = i, code = e.code(), "skipping feature: {}", e);
                    skipped += 1;
                }
            }
        }
        info!(features = features.len(), skipped, "decoded quarry dataset");
        Ok(Dataset { features, skipped })
    }

}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;
    fn into_iter(self) -> Self::IntoIter { self.features.iter() }
}

/// Encode features as a GeoJSON FeatureCollection, the shape the dataset
/// was read from.
pub fn collection_to_json<'a, I>(features: I) -> Value
where
    I: IntoIterator<Item = &'a Feature>,
{
    let features: Vec<Value> = features.into_iter().map(feature_to_json).collect();
    json!({ "type": "FeatureCollection", "features": features })
}

pub fn feature_to_json(f: &Feature) -> Value {
    let mut props = Map::new();
    if let Some(name) = &f.name {
        props.insert("name".into(), Value::String(name.clone()));
    }
    if let Some(d) = &f.description {
        props.insert("description".into(), json!({ "value": d }));
    }
    if let Some(c) = &f.style.icon_color {
        props.insert("icon-color".into(), Value::String(c.clone()));
    }
    if let Some(o) = f.style.icon_opacity {
        props.insert("icon-opacity".into(), json!(o));
    }
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [f.position.lon, f.position.lat] },
        "properties": Value::Object(props),
    })
}

fn collection_features(v: &Value) -> Result<&Vec<Value>, DatasetError> {
    let found = match v.get("type").and_then(|t| t.as_str()) {
        Some(t) => t.to_string(),
        None => json_kind(v).to_string(),
    };
    if found != "FeatureCollection" {
        return Err(DatasetError::NotCollection { found });
    }
    let raw = v
        .get("features")
        .and_then(|f| f.as_array())
        .ok_or_else(|| DatasetError::NotCollection { found: "FeatureCollection without features".into() })?;
    if raw.len() > limits::MAX_FEATURES {
        return Err(DatasetError::TooManyFeatures { count: raw.len(), max: limits::MAX_FEATURES });
    }
    Ok(raw)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object without type",
    }
}

fn bad(index: usize, reason: &str) -> DatasetError {
    DatasetError::BadFeature { index, reason: reason.to_string() }
}

fn decode_feature(index: usize, v: &Value) -> Result<Feature, DatasetError> {
    let obj = v.as_object().ok_or_else(|| bad(index, "feature must be an object"))?;
    if let Some(t) = obj.get("type") {
        if t.as_str() != Some("Feature") {
            return Err(bad(index, "type must be 'Feature'"));
        }
    }
    let position = decode_point(index, obj.get("geometry"))?;

    let props = match obj.get("properties") {
        None | Some(Value::Null) => None,
        Some(Value::Object(m)) => Some(m),
        Some(_) => return Err(bad(index, "properties must be an object")),
    };
    let Some(props) = props else {
        return Ok(Feature { name: None, description: None, position, style: FeatureStyle::default() });
    };

    let name = match props.get("name") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(bad(index, "name must be a string")),
    };
    let description = match props.get("description") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Object(d)) => d.get("value").and_then(|x| x.as_str()).map(str::to_string),
        _ => None,
    };
    // an empty colour means "use the default", like a missing one
    let icon_color = props
        .get("icon-color")
        .and_then(|c| c.as_str())
        .filter(|c| !c.trim().is_empty())
        .map(str::to_string);
    let icon_opacity = match props.get("icon-opacity") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .map(limits::clamp_opacity);

    Ok(Feature { name, description, position, style: FeatureStyle { icon_color, icon_opacity } })
}

fn decode_point(index: usize, geometry: Option<&Value>) -> Result<Position, DatasetError> {
    let g = geometry
        .and_then(|g| g.as_object())
        .ok_or_else(|| bad(index, "missing geometry"))?;
    let kind = g.get("type").and_then(|t| t.as_str()).ok_or_else(|| bad(index, "geometry without type"))?;
    if kind != "Point" {
        return Err(DatasetError::UnsupportedGeometry { index, kind: kind.to_string() });
    }
    let coords = g
        .get("coordinates")
        .and_then(|c| c.as_array())
        .filter(|c| c.len() >= 2)
        .ok_or_else(|| bad(index, "coordinates must be [lon, lat]"))?;
    // [lon, lat, alt?]; altitude is not used
    let (Some(lon), Some(lat)) = (coords[0].as_f64(), coords[1].as_f64()) else {
        return Err(bad(index, "coordinates must be numbers"));
    };
    Ok(Position { lat, lon })
}
