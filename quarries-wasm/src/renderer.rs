use js_sys::{Array, Object};
use quarries::marker::{IconSpec, MarkerStyle};
use quarries::{Feature, MarkerSpec, Renderer};
use wasm_bindgen::JsValue;

use crate::interop::{lat_lng, new_obj, num_pair, set_bool, set_kv, set_num, set_str};
use crate::leaflet::{self, Layer, LayerGroup};

/// Draws quarries into a Leaflet layer group. Each quarry is a coloured
/// circle with the pick-axe icon on top; the popup is bound to the circle.
pub struct LeafletRenderer {
    group: LayerGroup,
    style: MarkerStyle,
    icon: JsValue,
    z_index_offset: i32,
    drawn: usize,
}

impl LeafletRenderer {
    pub fn new(group: LayerGroup, style: MarkerStyle, icon: &IconSpec) -> Self {
        LeafletRenderer {
            group,
            style,
            icon: leaflet::icon(&icon_options(icon)),
            z_index_offset: icon.z_index_offset,
            drawn: 0,
        }
    }

    /// Markers currently on the map.
    pub fn drawn(&self) -> usize { self.drawn }

    fn quarry_layer(&self, spec: &MarkerSpec) -> Layer {
        let at = lat_lng(spec.lat, spec.lon);

        let circle_opts = new_obj();
        set_num(&circle_opts, "radius", spec.radius);
        set_str(&circle_opts, "fillColor", &spec.fill);
        set_str(&circle_opts, "color", &spec.outline);
        set_num(&circle_opts, "weight", spec.weight);
        set_num(&circle_opts, "opacity", spec.opacity);
        set_num(&circle_opts, "fillOpacity", spec.fill_opacity);
        let circle = leaflet::circle_marker(&at, &circle_opts);
        if let Some(popup) = &spec.popup {
            circle.bind_popup(popup);
        }

        let icon_opts = new_obj();
        set_kv(&icon_opts, "icon", &self.icon);
        set_bool(&icon_opts, "interactive", false);
        set_num(&icon_opts, "zIndexOffset", f64::from(self.z_index_offset));
        let pick = leaflet::marker(&at, &icon_opts);

        // circle first: it is the clickable part
        leaflet::layer_group(&Array::of2(&circle, &pick)).into()
    }
}

impl Renderer for LeafletRenderer {
    fn clear(&mut self) {
        self.group.clear_layers();
        self.drawn = 0;
    }

    fn draw(&mut self, features: &[&Feature]) {
        for f in features {
            let spec = MarkerSpec::for_feature(f, &self.style);
            self.group.add_layer(&self.quarry_layer(&spec));
        }
        self.drawn += features.len();
    }
}

fn icon_options(icon: &IconSpec) -> Object {
    let o = new_obj();
    set_str(&o, "iconUrl", &icon.url);
    set_kv(&o, "iconSize", &num_pair(icon.size));
    set_kv(&o, "iconAnchor", &num_pair(icon.anchor));
    set_kv(&o, "popupAnchor", &num_pair(icon.popup_anchor));
    o
}
