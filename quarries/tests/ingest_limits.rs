use quarries::limits::MAX_FEATURES;
use quarries::{Dataset, Feature, FilterController, Renderer};
use serde_json::json;

#[test]
fn json_caps_exceeded_features() {
    let too_many = MAX_FEATURES + 1;
    let features: Vec<_> = (0..too_many)
        .map(|_| json!({"type": "Feature", "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}}))
        .collect();
    let v = json!({"type": "FeatureCollection", "features": features});
    let err = Dataset::from_json_value(v).unwrap_err();
    assert_eq!(err.code(), "too_many_features");
}

#[test]
fn json_non_numeric_coordinates() {
    let v = json!({"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": ["35.1", "32.0"]}}
    ]});
    assert_eq!(Dataset::from_json_value_strict(v).unwrap_err().code(), "bad_feature");
}

#[test]
fn json_short_coordinates() {
    let v = json!({"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [35.1]}}
    ]});
    assert_eq!(Dataset::from_json_value_strict(v).unwrap_err().code(), "bad_feature");
}

#[test]
fn long_name_keeps_its_region() {
    let name = format!("Region: North\nCoordinates: 1,2\n{}", "field notes ".repeat(500));
    let v = json!({"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [35.0, 32.0]},
         "properties": {"name": name}}
    ]});
    let d = Dataset::from_json_value_strict(v).unwrap();
    let f: &Feature = &d.features()[0];
    assert_eq!(f.name.as_deref().map(str::len), Some(name.len()));
    assert_eq!(f.region(), Some("North"));
    assert_eq!(quarries::extract_regions(&d), vec!["North".to_string()]);
}

#[derive(Default)]
struct Count(usize);

impl Renderer for Count {
    fn clear(&mut self) { self.0 = 0; }
    fn draw(&mut self, features: &[&Feature]) { self.0 += features.len(); }
}

#[test]
fn wrapped_longitude_is_drawn_under_all() {
    let v = json!({"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [35.0, 32.0]},
         "properties": {"name": "Region: North\nCoordinates: 32,35"}},
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [190.0, 32.0]},
         "properties": {"name": "Region: East\nCoordinates: 32,190"}}
    ]});
    let d = Dataset::from_json_value(v).unwrap();
    assert_eq!(d.skipped(), 0);
    let mut c = FilterController::from_dataset(d, Count::default());
    assert_eq!(c.regions(), &["East".to_string(), "North".to_string()]);
    assert_eq!(c.select("all"), 2);
    assert_eq!(c.renderer().0, 2);
    assert_eq!(c.select("East"), 1);
}
