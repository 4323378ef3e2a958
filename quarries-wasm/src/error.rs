use js_sys::{Object, Reflect};
use quarries::{ConfigError, DatasetError};
use wasm_bindgen::prelude::*;

fn set_kv(obj: &Object, k: &str, v: &JsValue) { let _ = Reflect::set(obj, &JsValue::from_str(k), v); }

fn new_obj() -> Object { Object::new() }

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

pub fn dataset(e: &DatasetError) -> JsValue {
    let data = e.feature_index().map(|i| {
        let d = new_obj();
        set_kv(&d, "index", &JsValue::from_f64(i as f64));
        JsValue::from(d)
    });
    err(e.code(), e.to_string(), data)
}

pub fn config(e: &ConfigError) -> JsValue {
    let d = new_obj();
    let param = match e {
        ConfigError::NonFinite { param } | ConfigError::OutOfRange { param, .. } | ConfigError::Empty { param } => param,
    };
    set_kv(&d, "param", &JsValue::from_str(param));
    err(e.code(), e.to_string(), Some(d.into()))
}

#[inline]
pub fn json_parse(message: impl Into<String>) -> JsValue { err("json_parse", message, None) }

#[inline]
pub fn serialize(message: impl Into<String>) -> JsValue { err("serialize", message, None) }

#[inline]
pub fn missing_element(id: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "id", &JsValue::from_str(id));
    err("missing_element", format!("no element with id '{}'", id), Some(d.into()))
}

#[inline]
pub fn no_document() -> JsValue { err("no_document", "window.document is not available", None) }

/// Exception thrown by the map library.
pub fn leaflet(cause: JsValue) -> JsValue {
    let msg = cause
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| cause.as_string())
        .unwrap_or_else(|| "map library call failed".to_string());
    err("leaflet", msg, Some(cause))
}
