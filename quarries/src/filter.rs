//! Region filter: selection state, the filtered subset, and the render loop.
//!
//! The controller never keeps drawn markers. Every selection clears the
//! renderer and draws the freshly filtered subset, so what is on the map is
//! always `draw(filter(dataset, selection))`.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::dataset::Dataset;
use crate::model::Feature;
use crate::region::{extract_regions, RegionLabel};

/// Selection value meaning "no filter".
pub const ALL: &str = "all";
pub const ALL_LABEL: &str = "All";

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Region(RegionLabel),
}

impl Selection {
    /// Raw control value to selection. Anything but `"all"` is a region,
    /// known or not.
    pub fn from_value(value: &str) -> Self {
        if value == ALL { Selection::All } else { Selection::Region(value.to_string()) }
    }

    pub fn value(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Region(r) => r,
        }
    }

    pub fn matches(&self, f: &Feature) -> bool {
        match self {
            Selection::All => true,
            Selection::Region(r) => f.region() == Some(r.as_str()),
        }
    }
}

/// One control in the filter form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// `"all"` (checked) followed by one option per region, in the given order.
pub fn filter_options(regions: &[RegionLabel]) -> Vec<FilterOption> {
    let mut out = Vec::with_capacity(regions.len() + 1);
    out.push(FilterOption { value: ALL.to_string(), label: ALL_LABEL.to_string(), checked: true });
    out.extend(regions.iter().map(|r| FilterOption { value: r.clone(), label: r.clone(), checked: false }));
    out
}

/// Features visible under `selection`, in dataset order.
pub fn filter_features<'a>(features: &'a [Feature], selection: &Selection) -> Vec<&'a Feature> {
    features.iter().filter(|f| selection.matches(f)).collect()
}

/// Map surface that owns the drawn markers.
pub trait Renderer {
    /// Remove every marker drawn so far.
    fn clear(&mut self);
    /// Draw one marker per feature.
    fn draw(&mut self, features: &[&Feature]);
}

pub type ChangeHandler = Box<dyn FnMut(&str)>;

/// Filter form.
pub trait FilterUi {
    fn populate(&mut self, options: &[FilterOption]);
    /// Called with the raw value of the control the user picked.
    fn on_change(&mut self, handler: ChangeHandler);
}

pub struct FilterController<R> {
    features: Vec<Feature>,
    regions: Vec<RegionLabel>,
    selection: Selection,
    renderer: R,
}

impl<R: Renderer> FilterController<R> {
    pub fn new(features: Vec<Feature>, regions: Vec<RegionLabel>, renderer: R) -> Self {
        FilterController { features, regions, selection: Selection::All, renderer }
    }

    /// Extract the region list from `dataset` and build a controller over it.
    pub fn from_dataset(dataset: Dataset, renderer: R) -> Self {
        let regions = extract_regions(&dataset);
        Self::new(dataset.into_features(), regions, renderer)
    }

    /// Populate `ui`, route its changes to [`select`](Self::select), and
    /// draw the unfiltered map.
    pub fn initialize<U: FilterUi>(this: &Rc<RefCell<Self>>, ui: &mut U)
    where
        R: 'static,
    {
        let options = filter_options(&this.borrow().regions);
        ui.populate(&options);

        let weak = Rc::downgrade(this);
        ui.on_change(Box::new(move |value: &str| {
            let Some(ctrl) = weak.upgrade() else { return };
            match ctrl.try_borrow_mut() {
                Ok(mut c) => {
                    c.select(value);
                }
                Err(_) => warn!(value, "filter change ignored: selection already in progress"),
            };
        }));

        let mut c = this.borrow_mut();
        let drawn = c.select(ALL);
        info!(features = drawn, regions = c.regions.len(), "region filter ready");
    }

    /// Switch the filter and redraw. Returns the number of features drawn.
    pub fn select(&mut self, value: &str) -> usize {
        self.selection = Selection::from_value(value);
        let visible = filter_features(&self.features, &self.selection);
        self.renderer.clear();
        self.renderer.draw(&visible);
        debug!(selection = value, drawn = visible.len(), "region filter applied");
        visible.len()
    }

    /// Features visible under the current selection.
    pub fn visible(&self) -> Vec<&Feature> { filter_features(&self.features, &self.selection) }

    pub fn selection(&self) -> &Selection { &self.selection }
    pub fn regions(&self) -> &[RegionLabel] { &self.regions }
    pub fn features(&self) -> &[Feature] { &self.features }
    pub fn renderer(&self) -> &R { &self.renderer }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Draw(Vec<String>),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Renderer for Recorder {
        fn clear(&mut self) { self.calls.push(Call::Clear); }
        fn draw(&mut self, features: &[&Feature]) {
            self.calls.push(Call::Draw(features.iter().map(|f| f.name.clone().unwrap_or_default()).collect()));
        }
    }

    #[derive(Default)]
    struct FakeForm {
        options: Vec<FilterOption>,
        handler: Option<ChangeHandler>,
    }

    impl FilterUi for FakeForm {
        fn populate(&mut self, options: &[FilterOption]) { self.options = options.to_vec(); }
        fn on_change(&mut self, handler: ChangeHandler) { self.handler = Some(handler); }
    }

    impl FakeForm {
        fn pick(&mut self, value: &str) {
            if let Some(h) = self.handler.as_mut() { h(value) }
        }
    }

    fn dataset() -> Vec<Feature> {
        vec![
            Feature::new(Some("Region: South\nCoordinates: 1,2"), 2.0, 1.0),
            Feature::new(Some("Region: North\nCoordinates: 3,4"), 4.0, 3.0),
            Feature::new(Some("no region here"), 0.0, 0.0),
        ]
    }

    fn shared() -> Rc<RefCell<FilterController<Recorder>>> {
        let features = dataset();
        let regions = extract_regions(&features);
        Rc::new(RefCell::new(FilterController::new(features, regions, Recorder::default())))
    }

    #[test]
    fn options_put_all_first_and_checked() {
        let opts = filter_options(&["North".to_string(), "South".to_string()]);
        let values: Vec<_> = opts.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["all", "North", "South"]);
        assert_eq!(opts[0].label, "All");
        assert!(opts[0].checked);
        assert!(opts[1..].iter().all(|o| !o.checked && o.label == o.value));
    }

    #[test]
    fn initialize_populates_and_draws_everything() {
        let ctrl = shared();
        let mut form = FakeForm::default();
        FilterController::initialize(&ctrl, &mut form);

        assert_eq!(form.options.len(), 3);
        let c = ctrl.borrow();
        assert_eq!(c.selection(), &Selection::All);
        assert_eq!(c.renderer().calls.len(), 2);
        assert_eq!(c.renderer().calls[0], Call::Clear);
        assert!(matches!(&c.renderer().calls[1], Call::Draw(names) if names.len() == 3));
    }

    #[test]
    fn form_changes_clear_then_redraw() {
        let ctrl = shared();
        let mut form = FakeForm::default();
        FilterController::initialize(&ctrl, &mut form);

        form.pick("South");
        {
            let c = ctrl.borrow();
            assert_eq!(c.selection(), &Selection::Region("South".into()));
            let tail = &c.renderer().calls[2..];
            assert_eq!(tail, &[Call::Clear, Call::Draw(vec!["Region: South\nCoordinates: 1,2".into()])]);
        }

        form.pick("Atlantis");
        let c = ctrl.borrow();
        assert_eq!(c.renderer().calls.last(), Some(&Call::Draw(vec![])));
        assert!(c.visible().is_empty());
    }

    #[test]
    fn handler_is_inert_after_controller_drops() {
        let ctrl = shared();
        let mut form = FakeForm::default();
        FilterController::initialize(&ctrl, &mut form);
        drop(ctrl);
        form.pick("North");
    }

    #[test]
    fn select_returns_drawn_count() {
        let mut c = FilterController::from_dataset(Dataset::new(dataset()), Recorder::default());
        assert_eq!(c.regions(), ["North".to_string(), "South".to_string()]);
        assert_eq!(c.select("North"), 1);
        assert_eq!(c.select(ALL), 3);
        assert_eq!(c.select("north"), 0);
    }

    #[test]
    fn selection_round_trips_through_values() {
        assert_eq!(Selection::from_value("all"), Selection::All);
        assert_eq!(Selection::from_value("All"), Selection::Region("All".into()));
        assert_eq!(Selection::from_value("Negev").value(), "Negev");
        assert_eq!(Selection::All.value(), "all");
    }
}
