//! Selection state for classification categories.
//!
//! Components are chosen one at a time; materials and damage types allow
//! any number of choices. Selections only ever hold ids, and
//! [`SelectionSet::validate`] checks them against the catalogs they came from.

use std::collections::BTreeSet;

use crate::error::SelectionError;
use crate::model::{CatalogKind, Catalogs, OptionKey};

/// How many options a category accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// At most one option
    Single,
    /// Any number of options
    Multi,
}

impl SelectionMode {
    /// Selection mode used for a category, or None if it has no selector.
    pub fn for_kind(kind: CatalogKind) -> Option<Self> {
        match kind {
            CatalogKind::Component => Some(SelectionMode::Single),
            CatalogKind::Material | CatalogKind::DamageType => Some(SelectionMode::Multi),
            CatalogKind::Severity => None,
        }
    }
}

/// The chosen option ids of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    /// Single-select state
    Single(Option<OptionKey>),
    /// Multi-select state
    Multi(BTreeSet<OptionKey>),
}

impl CategorySelection {
    /// Create an empty selection for the given mode.
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => CategorySelection::Single(None),
            SelectionMode::Multi => CategorySelection::Multi(BTreeSet::new()),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        match self {
            CategorySelection::Single(_) => SelectionMode::Single,
            CategorySelection::Multi(_) => SelectionMode::Multi,
        }
    }

    /// Choose `id`. Replaces the previous choice in single mode, adds to the set in multi mode.
    pub fn select(&mut self, id: OptionKey) {
        match self {
            CategorySelection::Single(selected) => *selected = Some(id),
            CategorySelection::Multi(set) => {
                set.insert(id);
            }
        }
    }

    /// Flip membership of `id`.
    pub fn toggle(&mut self, id: OptionKey) {
        match self {
            CategorySelection::Single(selected) => {
                if selected.as_ref() == Some(&id) {
                    *selected = None;
                } else {
                    *selected = Some(id);
                }
            }
            CategorySelection::Multi(set) => {
                if !set.remove(&id) {
                    set.insert(id);
                }
            }
        }
    }

    /// Apply a click on `id`: select in single mode, toggle in multi mode.
    pub fn apply(&mut self, id: OptionKey) {
        match self.mode() {
            SelectionMode::Single => self.select(id),
            SelectionMode::Multi => self.toggle(id),
        }
    }

    pub fn contains(&self, id: &OptionKey) -> bool {
        match self {
            CategorySelection::Single(selected) => selected.as_ref() == Some(id),
            CategorySelection::Multi(set) => set.contains(id),
        }
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<OptionKey> {
        match self {
            CategorySelection::Single(selected) => selected.iter().cloned().collect(),
            CategorySelection::Multi(set) => set.iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CategorySelection::Single(selected) => usize::from(selected.is_some()),
            CategorySelection::Multi(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        match self {
            CategorySelection::Single(selected) => *selected = None,
            CategorySelection::Multi(set) => set.clear(),
        }
    }
}

/// Selections for every selectable category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    component: CategorySelection,
    material: CategorySelection,
    damage_type: CategorySelection,
}

impl SelectionSet {
    /// Create an empty selection set.
    pub fn new() -> Self {
        Self {
            component: CategorySelection::empty(SelectionMode::Single),
            material: CategorySelection::empty(SelectionMode::Multi),
            damage_type: CategorySelection::empty(SelectionMode::Multi),
        }
    }

    /// Selection of a category, or None for categories without a selector.
    pub fn get(&self, kind: CatalogKind) -> Option<&CategorySelection> {
        match kind {
            CatalogKind::Component => Some(&self.component),
            CatalogKind::Material => Some(&self.material),
            CatalogKind::DamageType => Some(&self.damage_type),
            CatalogKind::Severity => None,
        }
    }

    fn slot_mut(&mut self, kind: CatalogKind) -> Result<&mut CategorySelection, SelectionError> {
        match kind {
            CatalogKind::Component => Ok(&mut self.component),
            CatalogKind::Material => Ok(&mut self.material),
            CatalogKind::DamageType => Ok(&mut self.damage_type),
            CatalogKind::Severity => Err(SelectionError::NotSelectable { kind }),
        }
    }

    /// Replace a category's selection. The mode must match the category.
    pub fn set(
        &mut self,
        kind: CatalogKind,
        selection: CategorySelection,
    ) -> Result<(), SelectionError> {
        let slot = self.slot_mut(kind)?;
        if slot.mode() != selection.mode() {
            return Err(SelectionError::NotSelectable { kind });
        }
        *slot = selection;
        Ok(())
    }

    /// Click an option of a category, checking it exists in the catalogs first.
    pub fn apply(
        &mut self,
        catalogs: &Catalogs,
        kind: CatalogKind,
        id: OptionKey,
    ) -> Result<(), SelectionError> {
        if !catalogs.get(kind).contains(&id) {
            return Err(SelectionError::UnknownOption { kind, id });
        }
        self.slot_mut(kind)?.apply(id);
        Ok(())
    }

    /// Check every selected id against its catalog.
    pub fn validate(&self, catalogs: &Catalogs) -> Result<(), SelectionError> {
        for (kind, selection) in self.iter() {
            let catalog = catalogs.get(kind);
            if let Some(id) = selection.ids().into_iter().find(|id| !catalog.contains(id)) {
                return Err(SelectionError::UnknownOption { kind, id });
            }
        }
        Ok(())
    }

    /// Iterate over (category, selection) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CatalogKind, &CategorySelection)> {
        [
            (CatalogKind::Component, &self.component),
            (CatalogKind::Material, &self.material),
            (CatalogKind::DamageType, &self.damage_type),
        ]
        .into_iter()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, selection)| selection.is_empty())
    }
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new()
    }
}
