//! Tag index: groups content units by tag.
//!
//! A unit with N tags appears in N groups. Within a group units are ordered
//! newest first; units sharing a date keep their input order.

use crate::content::ContentUnit;
use std::collections::BTreeMap;

/// Tag name → units carrying that tag. Tags iterate in lexical order.
#[derive(Debug, Default)]
pub struct TagIndex<'a> {
    groups: BTreeMap<&'a str, Vec<&'a ContentUnit>>,
}

impl<'a> TagIndex<'a> {
    /// Group `units` by tag.
    pub fn build<I>(units: I) -> Self
    where
        I: IntoIterator<Item = &'a ContentUnit>,
    {
        let mut groups: BTreeMap<&'a str, Vec<&'a ContentUnit>> = BTreeMap::new();
        for unit in units {
            for tag in &unit.tags {
                groups.entry(tag.as_str()).or_default().push(unit);
            }
        }

        for group in groups.values_mut() {
            // `sort_by` is stable: ties keep insertion order.
            group.sort_by(|a, b| b.date.cmp(&a.date));
        }

        Self { groups }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a ContentUnit])> + '_ {
        self.groups.iter().map(|(tag, units)| (*tag, units.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Tags with their unit counts, most used first, then by name.
    pub fn counts(&self) -> Vec<(&'a str, usize)> {
        let mut counts: Vec<_> = self.iter().map(|(tag, units)| (tag, units.len())).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}
