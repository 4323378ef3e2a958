//! Region labels embedded in free-text feature names.
//!
//! Names exported from the source map look like
//! `Region: North\nCoordinates: 32.1,35.2`. The label is the run of letters
//! and whitespace after `Region:`, stopped by a literal `\n` escape, a
//! `Coordinates:` marker, or the end of the name.
//!
//! Startup extraction and selection-time filtering both go through
//! [`region_of`], so a label offered in the filter always matches the
//! features it was extracted from.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;

use crate::model::Feature;

/// Trimmed region text as it appears in feature names. Case-significant.
pub type RegionLabel = String;

fn region_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Region:\s*            - marker and leading blanks
        // ([A-Za-z\s]+?)        - the label, lazily so trailing blanks stay outside
        // \s*(?:\\n|Coordinates:|$) - literal backslash-n, coordinates marker, or end
        Regex::new(r"Region:\s*([A-Za-z\s]+?)\s*(?:\\n|Coordinates:|$)")
            .expect("region pattern is a valid regex")
    })
}

/// Region label of a single name, trimmed. `None` when the name carries no
/// label or the captured text is blank. Only the first match is used.
pub fn region_of(name: &str) -> Option<&str> {
    let caps = region_pattern().captures(name)?;
    let label = caps.get(1)?.as_str().trim();
    if label.is_empty() { None } else { Some(label) }
}

/// Distinct region labels across `features`, sorted by code point.
pub fn extract_regions<'a, I>(features: I) -> Vec<RegionLabel>
where
    I: IntoIterator<Item = &'a Feature>,
{
    let set: BTreeSet<&str> = features.into_iter().filter_map(Feature::region).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Feature count per region. Features without a region are counted apart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionIndex {
    counts: BTreeMap<RegionLabel, usize>,
    unlabelled: usize,
}

impl RegionIndex {
    pub fn build<'a, I>(features: I) -> Self
    where
        I: IntoIterator<Item = &'a Feature>,
    {
        let mut idx = RegionIndex::default();
        for f in features {
            match f.region() {
                Some(r) => *idx.counts.entry(r.to_string()).or_insert(0) += 1,
                None => idx.unlabelled += 1,
            }
        }
        idx
    }

    /// Sorted labels; same order and content as [`extract_regions`].
    pub fn labels(&self) -> Vec<RegionLabel> { self.counts.keys().cloned().collect() }

    pub fn count(&self, region: &str) -> usize { self.counts.get(region).copied().unwrap_or(0) }

    pub fn unlabelled(&self) -> usize { self.unlabelled }

    pub fn len(&self) -> usize { self.counts.len() }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
