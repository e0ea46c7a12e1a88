//! Annotation workspace: the state behind the photo annotation screen.
//!
//! The workspace owns the job being annotated, which photo is shown, the
//! classification panels and marker selection. Operations that the
//! embedding application needs to persist are queued as
//! [`WorkspaceEvent`]s and collected with [`AnnotationWorkspace::drain_events`].

use std::fmt;

use crate::color_utils::severity_color;
use crate::config::{AnnotatorConfig, ConfigError};
use crate::error::{LoadError, MarkerError, SelectionError};
use crate::marker::{MarkerPosition, MarkerSelection, MarkerStyle};
use crate::model::{
    Annotation, AnnotationId, AnnotationStatus, Catalog, CatalogKind, CatalogOption, Catalogs,
    Job, OptionKey, Photo, PhotoCursor, PhotoId, UNKNOWN_LABEL,
};
use crate::panel::ClassificationPanel;
use crate::provider::{CatalogProvider, PhotoProvider};
use crate::selection::SelectionSet;
use crate::timestamp::now_iso8601;

/// Something the embedding application may want to persist.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceEvent {
    /// A selector panel was confirmed
    SelectionConfirmed {
        /// Category of the confirmed panel
        kind: CatalogKind,
        /// Snapshot of all confirmed selections
        selection: SelectionSet,
        /// Confirmed severity option, which lives outside the selection set
        severity: Option<CatalogOption>,
    },
    /// A marker was placed
    AnnotationCreated(Annotation),
}

/// Human-readable labels of an annotation's classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub components: Vec<String>,
    pub materials: Vec<String>,
    pub damage_types: Vec<String>,
    pub severity: Option<String>,
    pub through_paint: bool,
}

impl fmt::Display for AnnotationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |labels: &[String]| {
            if labels.is_empty() {
                "-".to_string()
            } else {
                labels.join(", ")
            }
        };
        write!(
            f,
            "{} | {} | {} | {}",
            join(&self.components),
            join(&self.materials),
            join(&self.damage_types),
            self.severity.as_deref().unwrap_or("-")
        )?;
        if self.through_paint {
            f.write_str(" (through paint)")?;
        }
        Ok(())
    }
}

fn labels(catalog: &Catalog, ids: &[OptionKey]) -> Vec<String> {
    ids.iter()
        .map(|id| catalog.label_or_unknown(id).to_string())
        .collect()
}

/// Editing session over one job.
#[derive(Debug)]
pub struct AnnotationWorkspace {
    job: Job,
    cursor: PhotoCursor,
    panel: ClassificationPanel,
    markers: MarkerSelection,
    style: MarkerStyle,
    annotator: String,
    /// None once the id space is used up
    next_id: Option<AnnotationId>,
    events: Vec<WorkspaceEvent>,
}

impl AnnotationWorkspace {
    /// Start a session on `job`, classifying against `catalogs`.
    pub fn new(job: Job, catalogs: Catalogs) -> Self {
        let next_id = match job.max_annotation_id() {
            Some(id) => id.checked_add(1),
            None => Some(1),
        };
        if next_id.is_none() {
            log::warn!("Job '{}' has no free annotation ids left", job.id);
        }
        Self {
            job,
            cursor: PhotoCursor::default(),
            panel: ClassificationPanel::new(catalogs),
            markers: MarkerSelection::new(),
            style: MarkerStyle::default(),
            annotator: String::new(),
            next_id,
            events: Vec::new(),
        }
    }

    /// Start a session from a photo provider and a catalog provider.
    pub fn from_providers(
        photos: &impl PhotoProvider,
        catalogs: &impl CatalogProvider,
    ) -> Result<Self, LoadError> {
        let job = photos.load_job()?;
        let catalogs = catalogs.catalogs()?;
        Ok(Self::new(job, catalogs))
    }

    /// Start a session using catalogs, marker style and annotator name from `config`.
    pub fn from_config(job: Job, config: &AnnotatorConfig) -> Result<Self, ConfigError> {
        let workspace = Self::new(job, config.catalogs()?)
            .with_style(config.marker_style()?)
            .with_annotator(&config.preferences.annotator);
        Ok(workspace)
    }

    pub fn with_style(mut self, style: MarkerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_annotator(mut self, annotator: &str) -> Self {
        self.annotator = annotator.to_string();
        self
    }

    pub fn job(&self) -> &Job {
        &self.job
    }

    /// End the session and return the annotated job.
    pub fn into_job(self) -> Job {
        self.job
    }

    // ========================================================================
    // Photo navigation
    // ========================================================================

    pub fn active_photo(&self) -> Option<&Photo> {
        self.job.photos.get(self.cursor.index())
    }

    fn active_photo_mut(&mut self) -> Option<&mut Photo> {
        self.job.photos.get_mut(self.cursor.index())
    }

    pub fn next_photo(&mut self) {
        self.cursor.next(self.job.photos.len());
        self.markers.clear();
    }

    pub fn prev_photo(&mut self) {
        self.cursor.prev(self.job.photos.len());
        self.markers.clear();
    }

    /// Show the photo at `index`. Returns false if out of range.
    pub fn jump_to(&mut self, index: usize) -> bool {
        let moved = self.cursor.jump(index, self.job.photos.len());
        if moved {
            self.markers.clear();
        }
        moved
    }

    /// Get progress string like "2/4".
    pub fn progress(&self) -> String {
        self.cursor.progress(self.job.photos.len())
    }

    /// Remove a photo and every annotation on it.
    ///
    /// The active photo stays active unless it is the one removed.
    pub fn remove_photo(&mut self, id: PhotoId) -> Option<Photo> {
        let active_before = self.active_photo().map(|p| p.id);
        let index = self.job.photos.iter().position(|p| p.id == id)?;
        let removed = self.job.remove_photo(id)?;
        let len = self.job.photos.len();
        if index < self.cursor.index() {
            self.cursor.jump(self.cursor.index() - 1, len);
        }
        self.cursor.clamp(len);
        if self.active_photo().map(|p| p.id) != active_before {
            self.markers.clear();
        }
        Some(removed)
    }

    // ========================================================================
    // Classification panels
    // ========================================================================

    pub fn panel(&self) -> &ClassificationPanel {
        &self.panel
    }

    /// Access the panels for opening, searching and choosing options.
    pub fn panel_mut(&mut self) -> &mut ClassificationPanel {
        &mut self.panel
    }

    /// Confirm a panel and queue the resulting selection snapshot.
    pub fn confirm_panel(
        &mut self,
        kind: CatalogKind,
    ) -> Result<Option<SelectionSet>, SelectionError> {
        let snapshot = self.panel.confirm(kind)?;
        if let Some(selection) = &snapshot {
            self.events.push(WorkspaceEvent::SelectionConfirmed {
                kind,
                selection: selection.clone(),
                severity: self.panel.severity().cloned(),
            });
        }
        Ok(snapshot)
    }

    /// Cancel a panel. Confirmed selections are untouched.
    pub fn cancel_panel(&mut self, kind: CatalogKind) -> bool {
        self.panel.cancel(kind)
    }

    // ========================================================================
    // Markers
    // ========================================================================

    /// Place a marker at a percent position on the active photo.
    ///
    /// The new annotation takes the confirmed classification. Its color
    /// follows the severity score when one is set.
    pub fn place_marker(&mut self, x: f32, y: f32) -> Result<&Annotation, MarkerError> {
        let position = MarkerPosition::new(x, y)?;
        let photo_id = self.active_photo().ok_or(MarkerError::NoActivePhoto)?.id;

        let id = self.next_id.ok_or(MarkerError::IdSpaceExhausted)?;
        let annotation = self.build_annotation(id, photo_id, position);
        self.next_id = id.checked_add(1);
        log::debug!(
            "Placed marker {} on photo {} at ({:.1}, {:.1})",
            id,
            photo_id,
            position.x(),
            position.y()
        );
        self.events
            .push(WorkspaceEvent::AnnotationCreated(annotation.clone()));

        let photo = self
            .active_photo_mut()
            .ok_or(MarkerError::NoActivePhoto)?;
        photo.annotations.push(annotation);
        photo.annotation(id).ok_or(MarkerError::UnknownMarker(id))
    }

    fn build_annotation(
        &self,
        id: AnnotationId,
        photo_id: PhotoId,
        position: MarkerPosition,
    ) -> Annotation {
        let confirmed = self.panel.confirmed();
        let ids = |kind: CatalogKind| {
            confirmed
                .get(kind)
                .map(|selection| selection.ids())
                .unwrap_or_default()
        };
        let score = self.panel.severity().map(|option| option.value.clone());
        let color = match &score {
            Some(OptionKey::Number(n)) => severity_color(*n),
            _ => None,
        }
        .unwrap_or_else(|| self.style.color.clone());

        Annotation {
            id,
            photo_id,
            components: ids(CatalogKind::Component),
            material: ids(CatalogKind::Material),
            damage_type: ids(CatalogKind::DamageType),
            score,
            through_paint: self.panel.through_paint(),
            shape: self.style.shape_at(position),
            color,
            status: AnnotationStatus::Pending,
            created_by: self.annotator.clone(),
            created_at: now_iso8601(),
        }
    }

    /// Click a marker on the active photo, toggling its selection.
    pub fn click_marker(&mut self, id: AnnotationId) -> Result<Option<AnnotationId>, MarkerError> {
        let photo = self.active_photo().ok_or(MarkerError::NoActivePhoto)?;
        if photo.annotation(id).is_none() {
            return Err(MarkerError::UnknownMarker(id));
        }
        Ok(self.markers.click(id))
    }

    /// Marker under a percent position on the active photo.
    pub fn marker_at(&self, x: f32, y: f32) -> Option<AnnotationId> {
        self.active_photo()?.hit_test(x, y)
    }

    pub fn selected_marker(&self) -> Option<AnnotationId> {
        self.markers.selected()
    }

    /// Resolve an annotation's ids to labels, using "Unknown" for misses.
    pub fn describe(&self, annotation: &Annotation) -> AnnotationSummary {
        let severity = annotation.score.as_ref().map(|score| {
            self.panel
                .catalog(CatalogKind::Severity)
                .lookup_value(score)
                .map(|option| option.label.clone())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
        });
        AnnotationSummary {
            components: labels(
                self.panel.catalog(CatalogKind::Component),
                &annotation.components,
            ),
            materials: labels(self.panel.catalog(CatalogKind::Material), &annotation.material),
            damage_types: labels(
                self.panel.catalog(CatalogKind::DamageType),
                &annotation.damage_type,
            ),
            severity,
            through_paint: annotation.through_paint,
        }
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<WorkspaceEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_utils::{SEVERITY_COLORS, to_hex};
    use crate::model::CatalogKind::{Component, DamageType, Material, Severity};
    use crate::model::MarkerShape;
    use crate::sample::SampleJob;

    fn n(id: u32) -> OptionKey {
        OptionKey::Number(id)
    }

    fn workspace() -> AnnotationWorkspace {
        AnnotationWorkspace::from_providers(&SampleJob, &Catalogs::vehicle_defaults())
            .unwrap()
            .with_annotator("tester")
    }

    fn classify(ws: &mut AnnotationWorkspace) {
        let panel = ws.panel_mut();
        panel.open(Component);
        panel.choose(Component, n(3)).unwrap();
        ws.confirm_panel(Component).unwrap();

        let panel = ws.panel_mut();
        panel.open(Material);
        panel.choose(Material, n(2)).unwrap();
        panel.choose(Material, n(4)).unwrap();
        ws.confirm_panel(Material).unwrap();

        let panel = ws.panel_mut();
        panel.open(Severity);
        panel.choose(Severity, n(2)).unwrap();
        ws.confirm_panel(Severity).unwrap();
    }

    #[test]
    fn test_place_marker_uses_confirmed_selection() {
        let mut ws = workspace();
        classify(&mut ws);
        ws.panel_mut().set_through_paint(true);

        let annotation = ws.place_marker(40.0, 60.0).unwrap().clone();
        assert_eq!(annotation.id, 3);
        assert_eq!(annotation.photo_id, 101);
        assert_eq!(annotation.components, vec![n(3)]);
        assert_eq!(annotation.material, vec![n(2), n(4)]);
        assert!(annotation.damage_type.is_empty());
        assert_eq!(annotation.score, Some(n(2)));
        assert!(annotation.through_paint);
        assert_eq!(annotation.color, to_hex(SEVERITY_COLORS[1]));
        assert_ne!(annotation.color, MarkerStyle::default().color);
        assert_eq!(annotation.created_by, "tester");
        assert_eq!(annotation.shape.center(), (40.0, 60.0));

        assert_eq!(ws.active_photo().unwrap().annotations.len(), 2);
        assert_eq!(ws.place_marker(1.0, 1.0).unwrap().id, 4);
    }

    #[test]
    fn test_place_marker_without_selection() {
        let mut ws = workspace();
        let annotation = ws.place_marker(0.0, 100.0).unwrap();
        assert!(!annotation.is_classified());
        assert_eq!(annotation.score, None);
        assert_eq!(annotation.color, MarkerStyle::default().color);
    }

    #[test]
    fn test_place_marker_out_of_bounds() {
        let mut ws = workspace();
        assert!(matches!(
            ws.place_marker(101.0, 5.0),
            Err(MarkerError::OutOfBounds { .. })
        ));
        assert_eq!(ws.job().total_annotations(), 2);
        assert!(ws.drain_events().is_empty());
    }

    #[test]
    fn test_events_are_queued_in_order() {
        let mut ws = workspace();
        classify(&mut ws);
        ws.panel_mut().open(DamageType);
        assert!(ws.cancel_panel(DamageType));
        ws.place_marker(10.0, 10.0).unwrap();

        let events = ws.drain_events();
        assert_eq!(events.len(), 4);
        assert!(matches!(
            &events[1],
            WorkspaceEvent::SelectionConfirmed { kind: Material, selection, .. }
                if selection.get(Material).unwrap().ids() == vec![n(2), n(4)]
        ));
        assert!(matches!(&events[3], WorkspaceEvent::AnnotationCreated(a) if a.photo_id == 101));
        assert!(ws.drain_events().is_empty());
    }

    #[test]
    fn test_severity_confirm_event_carries_severity() {
        let mut ws = workspace();
        classify(&mut ws);

        let events = ws.drain_events();
        assert!(matches!(
            &events[0],
            WorkspaceEvent::SelectionConfirmed { kind: Component, severity: None, .. }
        ));
        match &events[2] {
            WorkspaceEvent::SelectionConfirmed { kind, severity, .. } => {
                assert_eq!(*kind, Severity);
                let severity = severity.as_ref().unwrap();
                assert_eq!(severity.id, n(2));
                assert_eq!(severity.label, "Moderate");
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_marker_click_selection() {
        let mut ws = workspace();
        let a = ws.place_marker(10.0, 10.0).unwrap().id;
        let b = ws.place_marker(80.0, 80.0).unwrap().id;

        assert_eq!(ws.click_marker(a).unwrap(), Some(a));
        assert_eq!(ws.click_marker(a).unwrap(), None);
        ws.click_marker(a).unwrap();
        assert_eq!(ws.click_marker(b).unwrap(), Some(b));
        assert_eq!(ws.selected_marker(), Some(b));

        assert_eq!(ws.click_marker(999), Err(MarkerError::UnknownMarker(999)));
        assert_eq!(ws.marker_at(80.5, 80.0), Some(b));
    }

    #[test]
    fn test_marker_on_other_photo_is_unknown() {
        let mut ws = workspace();
        // Annotation 2 lives on the third photo
        assert_eq!(ws.click_marker(2), Err(MarkerError::UnknownMarker(2)));
        assert!(ws.jump_to(2));
        assert_eq!(ws.click_marker(2).unwrap(), Some(2));
    }

    #[test]
    fn test_navigation_clears_marker_selection() {
        let mut ws = workspace();
        ws.click_marker(1).unwrap();
        ws.next_photo();
        assert_eq!(ws.selected_marker(), None);
        assert_eq!(ws.progress(), "2/4");
        ws.prev_photo();
        ws.prev_photo();
        assert_eq!(ws.progress(), "4/4");
        assert!(!ws.jump_to(4));
    }

    #[test]
    fn test_remove_active_photo() {
        let mut ws = workspace();
        ws.jump_to(3);
        let removed = ws.remove_photo(104).unwrap();
        assert_eq!(removed.id, 104);
        assert_eq!(ws.progress(), "3/3");
        assert_eq!(ws.active_photo().unwrap().id, 103);
    }

    #[test]
    fn test_remove_earlier_photo_keeps_active_photo() {
        let mut ws = workspace();
        assert!(ws.jump_to(2));
        assert_eq!(ws.click_marker(2).unwrap(), Some(2));

        ws.remove_photo(101).unwrap();
        assert_eq!(ws.active_photo().unwrap().id, 103);
        assert_eq!(ws.progress(), "2/3");
        assert_eq!(ws.selected_marker(), Some(2));
        assert!(ws.active_photo().unwrap().annotation(2).is_some());
    }

    #[test]
    fn test_remove_later_photo_keeps_selection() {
        let mut ws = workspace();
        ws.click_marker(1).unwrap();
        ws.remove_photo(104).unwrap();
        assert_eq!(ws.active_photo().unwrap().id, 101);
        assert_eq!(ws.selected_marker(), Some(1));
        assert!(ws.remove_photo(999).is_none());
    }

    #[test]
    fn test_remove_active_photo_clears_selection() {
        let mut ws = workspace();
        assert!(ws.jump_to(2));
        ws.click_marker(2).unwrap();
        ws.remove_photo(103).unwrap();
        assert_eq!(ws.active_photo().unwrap().id, 104);
        assert_eq!(ws.selected_marker(), None);
    }

    #[test]
    fn test_exhausted_annotation_ids() {
        let mut photo = Photo::new(1, "JOB", "front", "front.jpg", 1);
        photo.annotations.push(Annotation::new(
            u32::MAX,
            1,
            MarkerShape::circle(5.0, 5.0, 2.0),
            "#ffffff",
        ));
        let job = Job::new("FULL", vec![photo]).unwrap();

        let mut ws = AnnotationWorkspace::new(job, Catalogs::vehicle_defaults());
        assert_eq!(ws.place_marker(50.0, 50.0).unwrap_err(), MarkerError::IdSpaceExhausted);
        assert_eq!(ws.job().total_annotations(), 1);
        assert!(ws.drain_events().is_empty());
    }

    #[test]
    fn test_last_annotation_id_is_usable_once() {
        let mut photo = Photo::new(1, "JOB", "front", "front.jpg", 1);
        photo.annotations.push(Annotation::new(
            u32::MAX - 1,
            1,
            MarkerShape::circle(5.0, 5.0, 2.0),
            "#ffffff",
        ));
        let job = Job::new("ALMOST", vec![photo]).unwrap();

        let mut ws = AnnotationWorkspace::new(job, Catalogs::vehicle_defaults());
        assert_eq!(ws.place_marker(50.0, 50.0).unwrap().id, u32::MAX);
        assert_eq!(ws.place_marker(60.0, 60.0).unwrap_err(), MarkerError::IdSpaceExhausted);
    }

    #[test]
    fn test_no_active_photo() {
        let job = Job::new("EMPTY", Vec::new()).unwrap();
        let mut ws = AnnotationWorkspace::new(job, Catalogs::vehicle_defaults());
        assert_eq!(ws.place_marker(5.0, 5.0).unwrap_err(), MarkerError::NoActivePhoto);
        assert_eq!(ws.click_marker(1), Err(MarkerError::NoActivePhoto));
        assert_eq!(ws.progress(), "0/0");
    }

    #[test]
    fn test_describe_with_unknown_fallback() {
        let ws = workspace();
        let photo = ws.job().photo(103).unwrap();
        let summary = ws.describe(&photo.annotations[0]);
        assert_eq!(summary.components, vec!["Left Rear Door"]);
        assert_eq!(summary.materials, vec!["PAINT", "STEEL"]);
        assert_eq!(summary.damage_types, vec!["Dent"]);
        assert_eq!(summary.severity.as_deref(), Some("Major"));
        assert_eq!(
            summary.to_string(),
            "Left Rear Door | PAINT, STEEL | Dent | Major (through paint)"
        );

        let mut odd = photo.annotations[0].clone();
        odd.components = vec![n(404)];
        odd.score = Some(n(9));
        let summary = ws.describe(&odd);
        assert_eq!(summary.components, vec![UNKNOWN_LABEL]);
        assert_eq!(summary.severity.as_deref(), Some(UNKNOWN_LABEL));
    }

    #[test]
    fn test_from_config() {
        let mut config = AnnotatorConfig::new();
        config.preferences.annotator = "config-user".to_string();
        config.preferences.marker_radius = 3.5;
        let job = SampleJob.load_job().unwrap();

        let mut ws = AnnotationWorkspace::from_config(job, &config).unwrap();
        let annotation = ws.place_marker(50.0, 50.0).unwrap();
        assert_eq!(annotation.created_by, "config-user");
        assert_eq!(annotation.shape, MarkerShape::circle(50.0, 50.0, 3.5));
    }
}
