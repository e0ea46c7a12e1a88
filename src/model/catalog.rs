//! Option catalogs and search filtering.
//!
//! A catalog is the list of options for one classification category
//! (component, material, damage type or severity). Catalogs are built once
//! from configuration and handed to the panels that need them.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::option::{CatalogOption, OptionKey};
use crate::error::CatalogError;

/// Label shown when an id cannot be resolved against its catalog.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// The classification categories an annotation can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogKind {
    /// Vehicle component (hood, bumper, ...)
    Component,
    /// Surface material
    Material,
    /// Kind of damage
    DamageType,
    /// Severity score
    Severity,
}

impl CatalogKind {
    /// Get the display name for this catalog kind.
    pub fn name(&self) -> &'static str {
        match self {
            CatalogKind::Component => "Component",
            CatalogKind::Material => "Material",
            CatalogKind::DamageType => "Damage Type",
            CatalogKind::Severity => "Severity",
        }
    }

    /// Get all catalog kinds.
    pub fn all() -> &'static [CatalogKind] {
        &[
            CatalogKind::Component,
            CatalogKind::Material,
            CatalogKind::DamageType,
            CatalogKind::Severity,
        ]
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Return the options whose label contains `term`, ignoring case.
///
/// An empty term returns every option. Relative order is preserved.
pub fn filter_options<'a>(options: &'a [CatalogOption], term: &str) -> Vec<&'a CatalogOption> {
    if term.is_empty() {
        return options.iter().collect();
    }
    let needle = term.to_lowercase();
    options
        .iter()
        .filter(|option| option.label_matches(&needle))
        .collect()
}

/// A validated list of options for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    kind: CatalogKind,
    options: Vec<CatalogOption>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and blank labels.
    pub fn new(kind: CatalogKind, options: Vec<CatalogOption>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if option.label.trim().is_empty() {
                return Err(CatalogError::EmptyLabel {
                    kind,
                    id: option.id.clone(),
                });
            }
            if !seen.insert(&option.id) {
                return Err(CatalogError::DuplicateId {
                    kind,
                    id: option.id.clone(),
                });
            }
        }
        Ok(Self { kind, options })
    }

    /// Create a catalog without any options.
    pub fn empty(kind: CatalogKind) -> Self {
        Self {
            kind,
            options: Vec::new(),
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn options(&self) -> &[CatalogOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Find an option by id.
    pub fn lookup(&self, id: &OptionKey) -> Option<&CatalogOption> {
        self.options.iter().find(|option| &option.id == id)
    }

    /// Find an option by its stored value.
    pub fn lookup_value(&self, value: &OptionKey) -> Option<&CatalogOption> {
        self.options.iter().find(|option| &option.value == value)
    }

    /// Check whether `id` belongs to this catalog.
    pub fn contains(&self, id: &OptionKey) -> bool {
        self.lookup(id).is_some()
    }

    /// Label for `id`, or [`UNKNOWN_LABEL`] on a lookup miss.
    pub fn label_or_unknown(&self, id: &OptionKey) -> &str {
        self.lookup(id)
            .map(|option| option.label.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Options whose label contains `term` (case-insensitive).
    pub fn filter(&self, term: &str) -> Vec<&CatalogOption> {
        filter_options(&self.options, term)
    }
}

/// The full set of catalogs used by a classification session.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogs {
    pub component: Catalog,
    pub material: Catalog,
    pub damage_type: Catalog,
    pub severity: Catalog,
}

impl Catalogs {
    /// Get the catalog for a kind.
    pub fn get(&self, kind: CatalogKind) -> &Catalog {
        match kind {
            CatalogKind::Component => &self.component,
            CatalogKind::Material => &self.material,
            CatalogKind::DamageType => &self.damage_type,
            CatalogKind::Severity => &self.severity,
        }
    }

    /// Built-in catalogs for passenger vehicle inspections.
    pub fn vehicle_defaults() -> Self {
        Self {
            component: Catalog {
                kind: CatalogKind::Component,
                options: default_component_options(),
            },
            material: Catalog {
                kind: CatalogKind::Material,
                options: default_material_options(),
            },
            damage_type: Catalog {
                kind: CatalogKind::DamageType,
                options: default_damage_type_options(),
            },
            severity: Catalog {
                kind: CatalogKind::Severity,
                options: default_severity_options(),
            },
        }
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::vehicle_defaults()
    }
}

/// Default vehicle components.
pub fn default_component_options() -> Vec<CatalogOption> {
    [
        "Front Bumper",
        "Rear Bumper",
        "Hood",
        "Roof",
        "Trunk Lid",
        "Windshield",
        "Rear Window",
        "Left Front Door",
        "Right Front Door",
        "Left Rear Door",
        "Right Rear Door",
        "Left Front Fender",
        "Right Front Fender",
        "Left Rear Quarter Panel",
        "Right Rear Quarter Panel",
        "Left Mirror",
        "Right Mirror",
        "Headlamp",
        "Tail Lamp",
        "Grille",
        "Wheel",
    ]
    .iter()
    .zip(1u32..)
    .map(|(label, id)| CatalogOption::numbered(id, label))
    .collect()
}

/// Default surface materials.
pub fn default_material_options() -> Vec<CatalogOption> {
    ["PAINT", "STEEL", "ALUMINIUM", "PLASTIC", "GLASS", "CHROME", "RUBBER"]
        .iter()
        .zip(1u32..)
        .map(|(label, id)| CatalogOption::numbered(id, label))
        .collect()
}

/// Default damage types.
pub fn default_damage_type_options() -> Vec<CatalogOption> {
    [
        "Scratch",
        "Dent",
        "Crack",
        "Chip",
        "Scuff",
        "Rust",
        "Broken",
        "Missing",
        "Misaligned",
    ]
    .iter()
    .zip(1u32..)
    .map(|(label, id)| CatalogOption::numbered(id, label))
    .collect()
}

/// Default severity scale. The value is the score stored on annotations.
pub fn default_severity_options() -> Vec<CatalogOption> {
    ["Minor", "Moderate", "Major", "Severe"]
        .iter()
        .zip(1u32..)
        .map(|(label, id)| CatalogOption::numbered(id, label))
        .collect()
}
