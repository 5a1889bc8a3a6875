use super::catalog::Catalog;
use super::persistence::PersistedStackEntry;
use super::state::multiplier_in_range;
use super::state::ItemRef;
use super::state::Template;
use super::state::DEFAULT_MULTIPLIER;

#[derive(Debug, Clone, PartialEq)]
pub struct StackEntry {
    pub item: ItemRef,
    pub multiplier: f64,
}

impl StackEntry {
    pub fn new(item: ItemRef) -> Self {
        Self {
            item,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }

    pub fn item_id(&self) -> &str {
        &self.item.id
    }

    pub fn daily_cost(&self) -> f64 {
        self.item.cost_per_day * self.multiplier
    }

    pub fn daily_pills(&self) -> f64 {
        f64::from(self.item.pills_per_day) * self.multiplier
    }

    pub fn has_custom_multiplier(&self) -> bool {
        self.multiplier != DEFAULT_MULTIPLIER
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Ordered selection of catalog items, at most one entry per item id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    entries: Vec<StackEntry>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.entry(item_id).is_some()
    }

    pub fn entry(&self, item_id: &str) -> Option<&StackEntry> {
        self.entries.iter().find(|entry| entry.item_id() == item_id)
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(StackEntry::item_id)
    }

    /// Returns false when the item is already present.
    pub fn add(&mut self, item: ItemRef) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.entries.push(StackEntry::new(item));
        true
    }

    pub fn remove(&mut self, item_id: &str) -> Option<StackEntry> {
        let idx = self
            .entries
            .iter()
            .position(|entry| entry.item_id() == item_id)?;
        Some(self.entries.remove(idx))
    }

    pub fn toggle(&mut self, item: ItemRef) -> Toggled {
        if self.remove(&item.id).is_some() {
            Toggled::Removed
        } else {
            self.entries.push(StackEntry::new(item));
            Toggled::Added
        }
    }

    /// Out-of-range values and unknown ids leave the stack untouched.
    pub fn set_multiplier(&mut self, item_id: &str, value: f64) -> bool {
        if !multiplier_in_range(value) {
            return false;
        }
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.item_id() == item_id)
        {
            Some(entry) => {
                entry.multiplier = value;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replaces the whole stack with the template's known items at 1x.
    /// Returns the ids that were not found in the catalog.
    pub fn apply_template<'t>(&mut self, template: &'t Template, catalog: &Catalog) -> Vec<&'t str> {
        let mut skipped = Vec::new();
        self.entries.clear();
        for id in &template.supplements {
            match catalog.item(id) {
                Some(item) => {
                    self.add(item.clone());
                }
                None => skipped.push(id.as_str()),
            }
        }
        skipped
    }

    pub fn to_persisted(&self) -> Vec<PersistedStackEntry> {
        self.entries
            .iter()
            .map(|entry| PersistedStackEntry {
                supplement_id: entry.item_id().to_string(),
                multiplier: entry.multiplier,
            })
            .collect()
    }

    /// Rebuilds a stack from its stored form. Unknown ids are dropped,
    /// repeated ids keep their first entry and invalid multipliers reset to 1x.
    pub fn restore(persisted: &[PersistedStackEntry], catalog: &Catalog) -> Self {
        let mut stack = Self::new();
        for stored in persisted {
            let Some(item) = catalog.item(&stored.supplement_id) else {
                log::warn!(
                    "dropping unknown supplement '{}' from saved stack",
                    stored.supplement_id
                );
                continue;
            };
            if !stack.add(item.clone()) {
                log::warn!(
                    "ignoring repeated supplement '{}' in saved stack",
                    stored.supplement_id
                );
                continue;
            }
            if !stack.set_multiplier(&stored.supplement_id, stored.multiplier) {
                log::warn!(
                    "saved multiplier {} for '{}' is out of range, using 1x",
                    stored.multiplier,
                    stored.supplement_id
                );
            }
        }
        stack
    }
}
