use std::cell::RefCell;
use std::rc::Rc;

use quarries::basemap::{BaseLayer, LayerPanel};
use quarries::FilterController;
use wasm_bindgen::prelude::*;

mod api;
pub mod dom;
mod error;
mod interop;
pub mod leaflet;
pub mod logging;
pub mod renderer;

pub use api::*;

/// Street and satellite tile layers; exactly one is on the map.
pub(crate) struct Basemap {
    pub(crate) map: leaflet::LeafletMap,
    pub(crate) street: leaflet::Layer,
    pub(crate) satellite: leaflet::Layer,
}

impl Basemap {
    pub(crate) fn layer(&self, b: BaseLayer) -> &leaflet::Layer {
        match b {
            BaseLayer::Street => &self.street,
            BaseLayer::Satellite => &self.satellite,
        }
    }
}

/// A running quarry map. Dropping it detaches every page listener it added.
#[wasm_bindgen]
pub struct QuarryMap {
    pub(crate) controller: Rc<RefCell<FilterController<renderer::LeafletRenderer>>>,
    pub(crate) panel: Rc<RefCell<LayerPanel>>,
    pub(crate) basemap: Basemap,
    pub(crate) toggle: dom::LayerToggle,
    pub(crate) _form: dom::DomFilterUi,
    pub(crate) _listeners: Vec<Closure<dyn FnMut(JsValue)>>,
    pub(crate) _ready: Closure<dyn FnMut()>,
}

impl QuarryMap {
    pub fn rs_select(&self, value: &str) -> usize { self.controller.borrow_mut().select(value) }
    pub fn rs_selection(&self) -> String { self.controller.borrow().selection().value().to_string() }

    /// Swap the visible base layer. Returns false when `b` is already shown.
    pub fn rs_set_base(&self, b: BaseLayer) -> bool {
        let prev = self.panel.borrow().base();
        if !self.panel.borrow_mut().set_base(b) {
            return false;
        }
        self.basemap.map.remove_layer(self.basemap.layer(prev));
        self.basemap.map.add_layer(self.basemap.layer(b));
        true
    }
}
