//! DOM side of the page: the region radio form and the layer panel toggle.
//! Missing elements make the matching feature inert instead of failing.

use std::cell::RefCell;
use std::rc::Rc;

use quarries::basemap::{LayerPanel, PanelPlacement};
use quarries::filter::{ChangeHandler, FilterOption, FilterUi};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement};

pub const RADIO_NAME: &str = "region";

/// Radio form listing `all` plus every region.
pub struct DomFilterUi {
    document: Document,
    form: Option<HtmlElement>,
    listener: Option<Closure<dyn FnMut(Event)>>,
}

impl DomFilterUi {
    pub fn attach(document: &Document, id: &str) -> Self {
        let form = document.get_element_by_id(id).and_then(|e| e.dyn_into::<HtmlElement>().ok());
        if form.is_none() {
            debug!(id, "filter form not found; region filter disabled");
        }
        DomFilterUi { document: document.clone(), form, listener: None }
    }

    pub fn is_attached(&self) -> bool { self.form.is_some() }

    fn option_row(&self, opt: &FilterOption) -> Result<(Element, Element), JsValue> {
        let input: HtmlInputElement = self.document.create_element("input")?.dyn_into()?;
        input.set_type("radio");
        input.set_name(RADIO_NAME);
        input.set_value(&opt.value);
        input.set_checked(opt.checked);
        input.set_default_checked(opt.checked);

        let label = self.document.create_element("label")?;
        label.append_child(&input)?;
        // text node, so labels are never parsed as markup
        label.append_with_str_1(&format!(" {}", opt.label))?;
        let br = self.document.create_element("br")?;
        Ok((label, br))
    }

    fn detach_listener(&mut self) {
        if let (Some(form), Some(l)) = (&self.form, self.listener.take()) {
            let _ = form.remove_event_listener_with_callback("change", l.as_ref().unchecked_ref());
        }
    }
}

impl FilterUi for DomFilterUi {
    fn populate(&mut self, options: &[FilterOption]) {
        let Some(form) = &self.form else { return };
        form.set_inner_html("");
        for opt in options {
            match self.option_row(opt) {
                Ok((label, br)) => {
                    let _ = form.append_child(&label);
                    let _ = form.append_child(&br);
                }
                Err(e) => warn!(value = %opt.value, "could not build filter option: {:?}", e),
            }
        }
    }

    fn on_change(&mut self, mut handler: ChangeHandler) {
        self.detach_listener();
        let Some(form) = &self.form else { return };
        let listener = Closure::<dyn FnMut(Event)>::new(move |e: Event| {
            let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else { return };
            if input.name() == RADIO_NAME {
                handler(&input.value());
            }
        });
        if form.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref()).is_ok() {
            self.listener = Some(listener);
        }
    }
}

impl Drop for DomFilterUi {
    fn drop(&mut self) { self.detach_listener(); }
}

/// Shows and hides the floating layer panel.
pub struct LayerToggle {
    panel: Rc<RefCell<LayerPanel>>,
    wrapper: Option<HtmlElement>,
    button: Option<Element>,
    click: Option<Closure<dyn FnMut(Event)>>,
}

impl LayerToggle {
    /// Wire `button_id` to flip the panel held in `wrapper_id`. Either one
    /// missing leaves the toggle inert.
    pub fn wire(document: &Document, wrapper_id: &str, button_id: &str, panel: Rc<RefCell<LayerPanel>>) -> Self {
        let wrapper = document.get_element_by_id(wrapper_id).and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let button = document.get_element_by_id(button_id);
        let mut toggle = LayerToggle { panel, wrapper, button, click: None };
        match (&toggle.wrapper, &toggle.button) {
            (Some(wrapper), Some(button)) => {
                let panel = toggle.panel.clone();
                let wrapper = wrapper.clone();
                let click = Closure::<dyn FnMut(Event)>::new(move |_e: Event| {
                    let mut p = panel.borrow_mut();
                    p.toggle();
                    show(&wrapper, &p);
                });
                if button.add_event_listener_with_callback("click", click.as_ref().unchecked_ref()).is_ok() {
                    toggle.click = Some(click);
                }
            }
            _ => debug!(wrapper_id, button_id, "layer toggle elements missing; toggle disabled"),
        }
        toggle
    }

    pub fn wrapper(&self) -> Option<&HtmlElement> { self.wrapper.as_ref() }

    /// Same as clicking the button; returns the new visibility.
    pub fn toggle(&self) -> bool {
        let mut p = self.panel.borrow_mut();
        let visible = p.toggle();
        if let Some(wrapper) = &self.wrapper {
            show(wrapper, &p);
        }
        visible
    }
}

impl Drop for LayerToggle {
    fn drop(&mut self) {
        if let (Some(button), Some(click)) = (&self.button, self.click.take()) {
            let _ = button.remove_event_listener_with_callback("click", click.as_ref().unchecked_ref());
        }
    }
}

/// Move the map library's layer control into `wrapper` and position it.
pub fn place_panel(wrapper: &HtmlElement, control: &HtmlElement, placement: &PanelPlacement, panel: &LayerPanel) {
    let _ = wrapper.append_child(control);
    let style = wrapper.style();
    let _ = style.set_property("position", "absolute");
    let _ = style.set_property("top", &format!("{}px", placement.top));
    let _ = style.set_property("left", &format!("{}px", placement.left));
    let _ = style.set_property("z-index", &placement.z_index.to_string());
    show(wrapper, panel);
}

fn show(wrapper: &HtmlElement, panel: &LayerPanel) {
    let _ = wrapper.style().set_property("display", panel.display());
}
