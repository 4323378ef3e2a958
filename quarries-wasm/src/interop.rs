use js_sys::{Array, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }

pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}

pub fn set_num(obj: &Object, k: &str, v: f64) { set_kv(obj, k, &JsValue::from_f64(v)) }
pub fn set_str(obj: &Object, k: &str, v: &str) { set_kv(obj, k, &JsValue::from_str(v)) }
pub fn set_bool(obj: &Object, k: &str, v: bool) { set_kv(obj, k, &JsValue::from_bool(v)) }

pub fn str_array<S: AsRef<str>>(items: &[S]) -> Array {
    items.iter().map(|s| JsValue::from_str(s.as_ref())).collect()
}

/// `[lat, lng]` pair in Leaflet's argument order.
pub fn lat_lng(lat: f64, lon: f64) -> Array {
    Array::of2(&JsValue::from_f64(lat), &JsValue::from_f64(lon))
}

pub fn num_pair(p: [f64; 2]) -> Array {
    Array::of2(&JsValue::from_f64(p[0]), &JsValue::from_f64(p[1]))
}

/// Serialize to plain JS objects (not `Map`s), as JSON would.
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}
