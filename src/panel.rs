//! Selector panels for classifying damage.
//!
//! A [`SelectorPanel`] presents one catalog as a searchable list. While open
//! it edits a private working copy that is seeded from the last confirmed
//! selection, so cancelling never leaks partial edits back to the caller.
//!
//! [`ClassificationPanel`] groups the panels of all categories and owns the
//! confirmed state that new markers are classified with.

use crate::error::SelectionError;
use crate::model::{Catalog, CatalogKind, CatalogOption, Catalogs, OptionKey};
use crate::selection::{CategorySelection, SelectionMode, SelectionSet};

/// Lifecycle of a selector panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    /// Panel is hidden
    Closed,
    /// Panel is shown and editing a working copy
    Open {
        /// Selection being edited
        working: CategorySelection,
        /// Current search term
        search: String,
    },
}

/// One visible row of an open panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRow<'a> {
    pub option: &'a CatalogOption,
    pub selected: bool,
}

/// Searchable option list for a single category.
#[derive(Debug, Clone)]
pub struct SelectorPanel {
    catalog: Catalog,
    mode: SelectionMode,
    state: PanelState,
}

impl SelectorPanel {
    /// Create a closed panel over `catalog`.
    pub fn new(catalog: Catalog, mode: SelectionMode) -> Self {
        Self {
            catalog,
            mode,
            state: PanelState::Closed,
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.catalog.kind()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Open { .. })
    }

    /// Open the panel with a working copy of `confirmed` and an empty search.
    ///
    /// Reopening an already open panel discards its working copy.
    pub fn open(&mut self, confirmed: &CategorySelection) {
        let working = if confirmed.mode() == self.mode {
            confirmed.clone()
        } else {
            log::warn!(
                "{} panel opened with a mismatched selection, starting empty",
                self.kind()
            );
            CategorySelection::empty(self.mode)
        };
        self.state = PanelState::Open {
            working,
            search: String::new(),
        };
        log::debug!("Opened {} panel", self.kind());
    }

    /// Current search term, empty when closed.
    pub fn search(&self) -> &str {
        match &self.state {
            PanelState::Open { search, .. } => search,
            PanelState::Closed => "",
        }
    }

    /// Update the search term.
    pub fn set_search(&mut self, term: &str) -> Result<(), SelectionError> {
        let kind = self.kind();
        match &mut self.state {
            PanelState::Open { search, .. } => {
                *search = term.to_string();
                Ok(())
            }
            PanelState::Closed => Err(SelectionError::PanelClosed { kind }),
        }
    }

    /// Working selection, if open.
    pub fn working(&self) -> Option<&CategorySelection> {
        match &self.state {
            PanelState::Open { working, .. } => Some(working),
            PanelState::Closed => None,
        }
    }

    /// Rows matching the search term, in catalog order. Empty when closed.
    pub fn rows(&self) -> Vec<PanelRow<'_>> {
        let PanelState::Open { working, search } = &self.state else {
            return Vec::new();
        };
        self.catalog
            .filter(search)
            .into_iter()
            .map(|option| PanelRow {
                option,
                selected: working.contains(&option.id),
            })
            .collect()
    }

    /// Click an option: select in single mode, toggle in multi mode.
    pub fn choose(&mut self, id: OptionKey) -> Result<(), SelectionError> {
        let kind = self.kind();
        if !self.catalog.contains(&id) {
            return Err(SelectionError::UnknownOption { kind, id });
        }
        match &mut self.state {
            PanelState::Open { working, .. } => {
                working.apply(id);
                Ok(())
            }
            PanelState::Closed => Err(SelectionError::PanelClosed { kind }),
        }
    }

    /// Close the panel and hand back the working selection.
    ///
    /// Returns None if the panel was not open.
    pub fn confirm(&mut self) -> Option<CategorySelection> {
        match std::mem::replace(&mut self.state, PanelState::Closed) {
            PanelState::Open { working, .. } => {
                log::debug!("Confirmed {} panel: {} selected", self.kind(), working.len());
                Some(working)
            }
            PanelState::Closed => None,
        }
    }

    /// Close the panel, discarding the working selection.
    ///
    /// Returns false if the panel was not open.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = PanelState::Closed;
        if was_open {
            log::debug!("Cancelled {} panel", self.kind());
        }
        was_open
    }
}

/// Selector panels for every category plus the confirmed classification.
#[derive(Debug, Clone)]
pub struct ClassificationPanel {
    component: SelectorPanel,
    material: SelectorPanel,
    damage_type: SelectorPanel,
    severity: SelectorPanel,
    confirmed: SelectionSet,
    confirmed_severity: CategorySelection,
    through_paint: bool,
}

impl ClassificationPanel {
    /// Create closed panels over the given catalogs with nothing confirmed.
    pub fn new(catalogs: Catalogs) -> Self {
        let Catalogs {
            component,
            material,
            damage_type,
            severity,
        } = catalogs;
        Self {
            component: SelectorPanel::new(component, SelectionMode::Single),
            material: SelectorPanel::new(material, SelectionMode::Multi),
            damage_type: SelectorPanel::new(damage_type, SelectionMode::Multi),
            severity: SelectorPanel::new(severity, SelectionMode::Single),
            confirmed: SelectionSet::new(),
            confirmed_severity: CategorySelection::empty(SelectionMode::Single),
            through_paint: false,
        }
    }

    pub fn panel(&self, kind: CatalogKind) -> &SelectorPanel {
        match kind {
            CatalogKind::Component => &self.component,
            CatalogKind::Material => &self.material,
            CatalogKind::DamageType => &self.damage_type,
            CatalogKind::Severity => &self.severity,
        }
    }

    fn panel_mut(&mut self, kind: CatalogKind) -> &mut SelectorPanel {
        match kind {
            CatalogKind::Component => &mut self.component,
            CatalogKind::Material => &mut self.material,
            CatalogKind::DamageType => &mut self.damage_type,
            CatalogKind::Severity => &mut self.severity,
        }
    }

    pub fn catalog(&self, kind: CatalogKind) -> &Catalog {
        self.panel(kind).catalog()
    }

    /// Category of the currently open panel.
    pub fn open_kind(&self) -> Option<CatalogKind> {
        CatalogKind::all()
            .iter()
            .copied()
            .find(|kind| self.panel(*kind).is_open())
    }

    fn confirmed_for(&self, kind: CatalogKind) -> &CategorySelection {
        self.confirmed
            .get(kind)
            .unwrap_or(&self.confirmed_severity)
    }

    /// Open the panel for `kind`, seeded from its confirmed selection.
    ///
    /// Only one panel is open at a time; any other open panel is cancelled.
    pub fn open(&mut self, kind: CatalogKind) {
        if let Some(other) = self.open_kind().filter(|other| *other != kind) {
            self.panel_mut(other).cancel();
        }
        let seed = self.confirmed_for(kind).clone();
        self.panel_mut(kind).open(&seed);
    }

    pub fn set_search(&mut self, kind: CatalogKind, term: &str) -> Result<(), SelectionError> {
        self.panel_mut(kind).set_search(term)
    }

    pub fn choose(&mut self, kind: CatalogKind, id: OptionKey) -> Result<(), SelectionError> {
        self.panel_mut(kind).choose(id)
    }

    /// Confirm the panel for `kind`, commit its selection and return a snapshot.
    ///
    /// Returns None if that panel was not open.
    pub fn confirm(&mut self, kind: CatalogKind) -> Result<Option<SelectionSet>, SelectionError> {
        let Some(selection) = self.panel_mut(kind).confirm() else {
            return Ok(None);
        };
        if kind == CatalogKind::Severity {
            self.confirmed_severity = selection;
        } else {
            self.confirmed.set(kind, selection)?;
        }
        Ok(Some(self.confirmed.clone()))
    }

    /// Cancel the panel for `kind`. The confirmed state is untouched.
    pub fn cancel(&mut self, kind: CatalogKind) -> bool {
        self.panel_mut(kind).cancel()
    }

    /// The last confirmed selections.
    pub fn confirmed(&self) -> &SelectionSet {
        &self.confirmed
    }

    /// The confirmed severity option, if any.
    pub fn severity(&self) -> Option<&CatalogOption> {
        let id = self.confirmed_severity.ids().into_iter().next()?;
        self.severity.catalog().lookup(&id)
    }

    pub fn through_paint(&self) -> bool {
        self.through_paint
    }

    pub fn set_through_paint(&mut self, through_paint: bool) {
        self.through_paint = through_paint;
    }

    /// Close all panels and forget every confirmed choice.
    pub fn reset(&mut self) {
        for kind in CatalogKind::all() {
            self.panel_mut(*kind).cancel();
        }
        self.confirmed = SelectionSet::new();
        self.confirmed_severity.clear();
        self.through_paint = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CatalogKind::{Component, DamageType, Material, Severity};

    fn n(id: u32) -> OptionKey {
        OptionKey::Number(id)
    }

    fn material_panel() -> SelectorPanel {
        SelectorPanel::new(Catalogs::vehicle_defaults().material, SelectionMode::Multi)
    }

    #[test]
    fn test_closed_panel_rejects_interaction() {
        let mut panel = material_panel();
        assert!(panel.rows().is_empty());
        assert_eq!(
            panel.choose(n(1)),
            Err(SelectionError::PanelClosed { kind: Material })
        );
        assert!(panel.set_search("pa").is_err());
        assert!(panel.confirm().is_none());
        assert!(!panel.cancel());
    }

    #[test]
    fn test_rows_follow_search_and_working_copy() {
        let mut panel = material_panel();
        panel.open(&CategorySelection::empty(SelectionMode::Multi));
        panel.choose(n(1)).unwrap();
        panel.set_search("pa").unwrap();

        let rows = panel.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].option.label, "PAINT");
        assert!(rows[0].selected);

        panel.set_search("").unwrap();
        assert_eq!(panel.rows().len(), panel.catalog().len());
    }

    #[test]
    fn test_choose_unknown_option() {
        let mut panel = material_panel();
        panel.open(&CategorySelection::empty(SelectionMode::Multi));
        assert!(matches!(
            panel.choose(n(42)),
            Err(SelectionError::UnknownOption { .. })
        ));
        assert!(panel.working().unwrap().is_empty());
    }

    #[test]
    fn test_confirm_then_reopen_seeds_working_copy() {
        let mut panel = ClassificationPanel::new(Catalogs::vehicle_defaults());
        panel.open(Material);
        panel.choose(Material, n(2)).unwrap();
        panel.choose(Material, n(4)).unwrap();
        let snapshot = panel.confirm(Material).unwrap().unwrap();

        let expected: Vec<OptionKey> = vec![n(2), n(4)];
        assert_eq!(snapshot.get(Material).unwrap().ids(), expected);
        assert!(!panel.panel(Material).is_open());

        panel.open(Material);
        let working = panel.panel(Material).working().unwrap();
        assert_eq!(working.ids(), expected);
        assert_eq!(panel.panel(Material).search(), "");
    }

    #[test]
    fn test_cancel_keeps_confirmed_state() {
        let mut panel = ClassificationPanel::new(Catalogs::vehicle_defaults());
        panel.open(DamageType);
        panel.choose(DamageType, n(1)).unwrap();
        panel.confirm(DamageType).unwrap();
        let before = panel.confirmed().clone();

        panel.open(DamageType);
        panel.choose(DamageType, n(1)).unwrap();
        panel.choose(DamageType, n(3)).unwrap();
        assert!(panel.cancel(DamageType));

        assert_eq!(panel.confirmed(), &before);
        panel.open(DamageType);
        assert_eq!(
            panel.panel(DamageType).working().unwrap().ids(),
            vec![n(1)]
        );
    }

    #[test]
    fn test_component_single_select() {
        let mut panel = ClassificationPanel::new(Catalogs::vehicle_defaults());
        panel.open(Component);
        panel.choose(Component, n(3)).unwrap();
        panel.choose(Component, n(5)).unwrap();
        let snapshot = panel.confirm(Component).unwrap().unwrap();
        assert_eq!(snapshot.get(Component).unwrap().ids(), vec![n(5)]);
    }

    #[test]
    fn test_confirm_empty_selection_allowed() {
        let mut panel = ClassificationPanel::new(Catalogs::vehicle_defaults());
        panel.open(Material);
        let snapshot = panel.confirm(Material).unwrap().unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(panel.confirm(Material).unwrap(), None);
    }

    #[test]
    fn test_opening_panel_cancels_other() {
        let mut panel = ClassificationPanel::new(Catalogs::vehicle_defaults());
        panel.open(Material);
        panel.choose(Material, n(1)).unwrap();
        panel.open(Component);

        assert_eq!(panel.open_kind(), Some(Component));
        assert!(!panel.panel(Material).is_open());
        assert!(panel.confirmed().get(Material).unwrap().is_empty());
    }

    #[test]
    fn test_severity_confirm() {
        let mut panel = ClassificationPanel::new(Catalogs::vehicle_defaults());
        assert!(panel.severity().is_none());
        panel.open(Severity);
        panel.choose(Severity, n(3)).unwrap();
        panel.confirm(Severity).unwrap();
        assert_eq!(panel.severity().map(|o| o.label.as_str()), Some("Major"));
    }

    #[test]
    fn test_reset() {
        let mut panel = ClassificationPanel::new(Catalogs::vehicle_defaults());
        panel.open(Component);
        panel.choose(Component, n(1)).unwrap();
        panel.confirm(Component).unwrap();
        panel.set_through_paint(true);
        panel.open(Material);

        panel.reset();
        assert!(panel.confirmed().is_empty());
        assert!(!panel.through_paint());
        assert_eq!(panel.open_kind(), None);
    }
}
