//! Scripted annotation session over the bundled sample job.
//!
//! Classifies a dent on the front left photo, places a marker, and prints
//! the resulting job as JSON on stdout.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use damage_annotator::AnnotatorConfig;

    let config = AnnotatorConfig::load_from_default_path().unwrap_or_default();

    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    if let Err(e) = run(&config) {
        log::error!("Session failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run(config: &damage_annotator::AnnotatorConfig) -> Result<(), Box<dyn std::error::Error>> {
    use damage_annotator::model::{CatalogKind, OptionKey};
    use damage_annotator::provider::PhotoProvider;
    use damage_annotator::sample::SampleJob;
    use damage_annotator::{AnnotationWorkspace, WorkspaceEvent};

    let job = SampleJob.load_job()?;
    let mut workspace = AnnotationWorkspace::from_config(job, config)?;

    let panel = workspace.panel_mut();
    panel.open(CatalogKind::Component);
    panel.set_search(CatalogKind::Component, "hood")?;
    let hood = panel
        .panel(CatalogKind::Component)
        .rows()
        .first()
        .map(|row| row.option.id.clone())
        .ok_or("no component matches 'hood'")?;
    panel.choose(CatalogKind::Component, hood)?;
    workspace.confirm_panel(CatalogKind::Component)?;

    let panel = workspace.panel_mut();
    panel.open(CatalogKind::Material);
    panel.choose(CatalogKind::Material, OptionKey::Number(1))?;
    workspace.confirm_panel(CatalogKind::Material)?;

    let panel = workspace.panel_mut();
    panel.open(CatalogKind::DamageType);
    panel.choose(CatalogKind::DamageType, OptionKey::Number(2))?;
    workspace.confirm_panel(CatalogKind::DamageType)?;

    let panel = workspace.panel_mut();
    panel.open(CatalogKind::Severity);
    panel.choose(CatalogKind::Severity, OptionKey::Number(2))?;
    workspace.confirm_panel(CatalogKind::Severity)?;

    let annotation = workspace.place_marker(35.0, 42.5)?.clone();
    log::info!(
        "Marker {} on {}: {}",
        annotation.id,
        workspace
            .active_photo()
            .map(|p| p.view_name.as_str())
            .unwrap_or("?"),
        workspace.describe(&annotation)
    );

    for event in workspace.drain_events() {
        match event {
            WorkspaceEvent::SelectionConfirmed { kind, severity, .. } => {
                log::debug!(
                    "Event: {} selection confirmed (severity {})",
                    kind,
                    severity.as_ref().map_or("-", |option| option.label.as_str())
                )
            }
            WorkspaceEvent::AnnotationCreated(a) => {
                log::debug!("Event: annotation {} created", a.id)
            }
        }
    }

    println!("{}", workspace.into_job().to_json()?);
    Ok(())
}

// WASM builds embed the library instead
#[cfg(target_arch = "wasm32")]
fn main() {}
