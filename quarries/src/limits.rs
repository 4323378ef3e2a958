// Ingestion caps for the static quarry dataset (GeoJSON)

// Collection size cap
pub const MAX_FEATURES: usize = 100_000;

#[inline]
pub fn clamp_opacity(o: f64) -> f64 { if o.is_finite() { o.max(0.0).min(1.0) } else { 1.0 } }
