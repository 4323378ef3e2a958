use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Reflect};
use quarries::basemap::{BaseLayer, LayerPanel, OVERLAY_LABEL};
use quarries::dataset::collection_to_json;
use quarries::filter::{filter_features, Selection};
use quarries::{Dataset, FilterController, MapConfig, RegionIndex};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

use crate::dom::{place_panel, DomFilterUi, LayerToggle};
use crate::interop::{new_obj, num_pair, set_bool, set_kv, set_num, set_str, str_array, to_js};
use crate::leaflet;
use crate::renderer::LeafletRenderer;
use crate::{error, logging, Basemap, QuarryMap};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route `tracing` output to the console. Safe to call more than once.
#[wasm_bindgen]
pub fn init_logging(level: Option<String>) -> bool {
    logging::init(logging::parse_level(level.as_deref()))
}

/// Accepts a GeoJSON object or its JSON text.
fn json_input(data: JsValue) -> Result<serde_json::Value, JsValue> {
    if let Some(text) = data.as_string() {
        return serde_json::from_str(&text).map_err(|e| error::json_parse(e.to_string()));
    }
    serde_wasm_bindgen::from_value::<serde_json::Value>(data).map_err(|e| error::json_parse(e.to_string()))
}

fn config_input(config: JsValue) -> Result<MapConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(MapConfig::default());
    }
    let cfg: MapConfig = serde_wasm_bindgen::from_value(config).map_err(|e| error::json_parse(e.to_string()))?;
    cfg.validate().map_err(|e| error::config(&e))?;
    Ok(cfg)
}

fn strict_dataset(data: JsValue) -> Result<Dataset, JsValue> {
    let v = json_input(data)?;
    Dataset::from_json_value_strict(v).map_err(|e| error::dataset(&e))
}

fn settle(r: Result<JsValue, JsValue>) -> JsValue {
    match r {
        Ok(v) => error::ok(v),
        Err(e) => e,
    }
}

/// Sorted distinct regions: `{ ok, value: string[] }`.
#[wasm_bindgen]
pub fn extract_regions_res(data: JsValue) -> JsValue {
    settle(strict_dataset(data).map(|d| str_array(&quarries::extract_regions(&d)).into()))
}

/// Features visible under `selection`, as a FeatureCollection.
#[wasm_bindgen]
pub fn filter_res(data: JsValue, selection: &str) -> JsValue {
    settle(strict_dataset(data).and_then(|d| {
        let sel = Selection::from_value(selection);
        let subset = filter_features(d.features(), &sel);
        to_js(&collection_to_json(subset)).map_err(|e| error::serialize(e.to_string()))
    }))
}

/// Dataset summary: feature count, per-region counts, unlabelled count.
#[wasm_bindgen]
pub fn parse_dataset_res(data: JsValue) -> JsValue {
    settle(strict_dataset(data).map(|d| {
        let idx = RegionIndex::build(&d);
        let regions: Array = idx
            .iter()
            .map(|(region, count)| {
                let o = new_obj();
                set_str(&o, "region", region);
                set_num(&o, "count", count as f64);
                JsValue::from(o)
            })
            .collect();
        let out = new_obj();
        set_num(&out, "features", d.len() as f64);
        set_kv(&out, "regions", &regions);
        set_num(&out, "unlabelled", idx.unlabelled() as f64);
        out.into()
    }))
}

/// Build the map into the page and render every quarry. Throws a
/// `{ ok: false, error }` object when the dataset or config is unusable or
/// the map container is missing.
#[wasm_bindgen]
pub fn start(data: JsValue, config: JsValue) -> Result<QuarryMap, JsValue> {
    let cfg = config_input(config)?;
    let dataset = Dataset::from_json_value(json_input(data)?).map_err(|e| error::dataset(&e))?;

    let document = web_sys::window().and_then(|w| w.document()).ok_or_else(error::no_document)?;
    if document.get_element_by_id(&cfg.dom.map).is_none() {
        return Err(error::missing_element(&cfg.dom.map));
    }

    let tile = |b: BaseLayer| {
        let src = cfg.tiles.get(b);
        let o = new_obj();
        set_str(&o, "attribution", &src.attribution);
        leaflet::tile_layer(&src.url, &o)
    };
    let street = tile(BaseLayer::Street);
    let satellite = tile(BaseLayer::Satellite);

    let map_opts = new_obj();
    set_kv(&map_opts, "center", &num_pair(cfg.center));
    set_num(&map_opts, "zoom", cfg.zoom);
    set_kv(&map_opts, "layers", &Array::of1(&street));
    let map = leaflet::map(&cfg.dom.map, &map_opts).map_err(error::leaflet)?;

    let group = leaflet::layer_group(&Array::new());
    group.add_to(&map);

    let bases = new_obj();
    set_kv(&bases, BaseLayer::Street.label(), &street);
    set_kv(&bases, BaseLayer::Satellite.label(), &satellite);
    let overlays = new_obj();
    set_kv(&overlays, OVERLAY_LABEL, &group);
    let control_opts = new_obj();
    set_bool(&control_opts, "collapsed", false);
    let control = leaflet::control_layers(&bases, &overlays, &control_opts).add_to(&map);

    let panel = Rc::new(RefCell::new(LayerPanel::new()));
    let toggle = LayerToggle::wire(&document, &cfg.dom.layer_wrapper, &cfg.dom.layer_toggle, panel.clone());

    // the control only has a container once the map is ready
    let ready = {
        let control = control.clone();
        let wrapper_present = toggle.wrapper().cloned();
        let placement = cfg.panel.clone();
        let panel = panel.clone();
        Closure::<dyn FnMut()>::new(move || {
            let (Some(container), Some(wrapper)) = (control.get_container(), &wrapper_present) else { return };
            place_panel(wrapper, &container, &placement, &panel.borrow());
        })
    };
    map.when_ready(&ready);

    let base_change = {
        let panel = panel.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |e: JsValue| {
            let name = Reflect::get(&e, &JsValue::from_str("name")).ok().and_then(|n| n.as_string());
            if let Some(b) = name.as_deref().and_then(BaseLayer::from_label) {
                panel.borrow_mut().set_base(b);
                debug!(base = b.label(), "base layer changed");
            }
        })
    };
    map.on("baselayerchange", &base_change);

    let renderer = LeafletRenderer::new(group, cfg.marker.clone(), &cfg.icon);
    let controller = Rc::new(RefCell::new(FilterController::from_dataset(dataset, renderer)));
    let mut form = DomFilterUi::attach(&document, &cfg.dom.filter_form);
    FilterController::initialize(&controller, &mut form);

    info!(
        features = controller.borrow().features().len(),
        regions = controller.borrow().regions().len(),
        "quarry map started"
    );

    Ok(QuarryMap {
        controller,
        panel,
        basemap: Basemap { map, street, satellite },
        toggle,
        _form: form,
        _listeners: vec![base_change],
        _ready: ready,
    })
}

#[wasm_bindgen]
impl QuarryMap {
    /// Apply a filter value (`"all"` or a region) and redraw.
    pub fn select(&self, value: &str) -> u32 {
        self.rs_select(value) as u32
    }
    pub fn selection(&self) -> String {
        self.rs_selection()
    }
    pub fn regions(&self) -> Array {
        str_array(self.controller.borrow().regions())
    }
    pub fn feature_count(&self) -> u32 {
        self.controller.borrow().features().len() as u32
    }
    pub fn visible_count(&self) -> u32 {
        self.controller.borrow().renderer().drawn() as u32
    }
    pub fn toggle_layer_panel(&self) -> bool {
        self.toggle.toggle()
    }
    pub fn layer_panel_visible(&self) -> bool {
        self.panel.borrow().is_visible()
    }
    /// Accepts `"Base Map"`, `"Satellite"`, `"street"` or `"satellite"`.
    /// True only when the shown base layer changed.
    pub fn set_base_layer(&self, label: &str) -> bool {
        BaseLayer::from_label(label).map_or(false, |b| self.rs_set_base(b))
    }
    pub fn base_layer(&self) -> String {
        self.panel.borrow().base().label().to_string()
    }
    /// Tear the map down and detach from the page.
    pub fn destroy(self) {
        self.basemap.map.remove();
    }
}
