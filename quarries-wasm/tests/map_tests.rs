use quarries_wasm::start;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

// Minimal stand-in for Leaflet's global `L`. It keeps the overlay group and
// the map's layer list so the tests can count what was drawn.
#[wasm_bindgen(inline_js = r#"
export function install_fake_leaflet() {
  const state = { map: null, overlay: null };
  const layer = (kind) => ({
    kind,
    addTo(m) {
      m.addLayer(this);
      if (this.kind === "group" && state.overlay === null) state.overlay = this;
      return this;
    },
    bindPopup(content) { this.popup = content; return this; },
  });
  const group = (layers) => {
    const g = layer("group");
    g.layers = Array.from(layers);
    g.addLayer = function (l) { this.layers.push(l); return this; };
    g.clearLayers = function () { this.layers = []; return this; };
    return g;
  };
  globalThis.L = {
    map(id, opts) {
      const m = {
        layers: [],
        addLayer(l) { if (!this.layers.includes(l)) this.layers.push(l); return this; },
        removeLayer(l) { this.layers = this.layers.filter((x) => x !== l); return this; },
        whenReady(f) { f(); return this; },
        on() { return this; },
        remove() { this.layers = []; return this; },
      };
      (opts.layers || []).forEach((l) => m.addLayer(l));
      state.map = m;
      return m;
    },
    tileLayer(url) { const l = layer("tile"); l.url = url; return l; },
    circleMarker(at, opts) { const l = layer("circle"); l.options = opts; return l; },
    marker() { return layer("marker"); },
    icon(opts) { return { options: opts }; },
    layerGroup: group,
    control: {
      layers() { return { addTo() { return this; }, getContainer() { return null; } }; },
    },
  };
  globalThis.__fakeLeaflet = state;
}

export function overlay_size() {
  const s = globalThis.__fakeLeaflet;
  return s && s.overlay ? s.overlay.layers.length : -1;
}

export function shown_tiles() {
  const s = globalThis.__fakeLeaflet;
  return s.map.layers.filter((l) => l.kind === "tile").map((l) => l.url);
}
"#)]
extern "C" {
    fn install_fake_leaflet();
    fn overlay_size() -> i32;
    fn shown_tiles() -> js_sys::Array;
}

const DATA: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [2, 1] },
      "properties": { "name": "Region: South\nCoordinates: 1,2", "description": { "value": "Pit A" } } },
    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [4, 3] },
      "properties": { "name": "Region: North\nCoordinates: 3,4", "icon-color": "" } },
    { "type": "Feature", "geometry": { "type": "Point", "coordinates": [190, 5] },
      "properties": { "name": "Region: East\nCoordinates: 5,190" } }
  ]
}"#;

fn mount(tag: &str, id: &str) {
    let doc = web_sys::window().unwrap().document().unwrap();
    if let Some(old) = doc.get_element_by_id(id) {
        old.remove();
    }
    let el: HtmlElement = doc.create_element(tag).unwrap().dyn_into().unwrap();
    el.set_id(id);
    doc.body().unwrap().append_child(&el).unwrap();
}

fn tiles() -> Vec<String> { shown_tiles().iter().filter_map(|v| v.as_string()).collect() }

#[wasm_bindgen_test]
fn selecting_redraws_the_overlay() {
    install_fake_leaflet();
    mount("div", "map-redraw");
    mount("form", "form-redraw");
    let cfg = js_sys::JSON::parse(r#"{"dom": {"map": "map-redraw", "filter_form": "form-redraw"}}"#).unwrap();
    let m = start(JsValue::from_str(DATA), cfg).unwrap();

    assert_eq!(m.feature_count(), 3);
    assert_eq!(m.visible_count(), 3);
    assert_eq!(overlay_size(), 3);

    assert_eq!(m.select("South"), 1);
    assert_eq!(m.visible_count(), 1);
    assert_eq!(overlay_size(), 1);
    assert_eq!(m.selection(), "South");

    assert_eq!(m.select("Nowhere"), 0);
    assert_eq!(overlay_size(), 0);

    assert_eq!(m.select("all"), 3);
    assert_eq!(overlay_size(), 3);
    m.destroy();
}

#[wasm_bindgen_test]
fn base_layer_swaps_tiles() {
    install_fake_leaflet();
    mount("div", "map-base");
    let cfg = js_sys::JSON::parse(r#"{"dom": {"map": "map-base", "filter_form": "form-base-missing"}}"#).unwrap();
    let m = start(JsValue::from_str(DATA), cfg).unwrap();

    let street = tiles();
    assert_eq!(street.len(), 1);
    assert!(street[0].contains("openstreetmap"));
    assert_eq!(m.base_layer(), "Base Map");

    assert!(m.set_base_layer("Satellite"));
    let sat = tiles();
    assert_eq!(sat.len(), 1);
    assert!(sat[0].contains("arcgisonline"));
    assert_eq!(m.base_layer(), "Satellite");

    // already shown, and unknown labels, change nothing
    assert!(!m.set_base_layer("satellite"));
    assert!(!m.set_base_layer("Terrain"));
    assert_eq!(tiles(), sat);

    assert!(m.set_base_layer("street"));
    assert_eq!(tiles(), street);
    m.destroy();
}
