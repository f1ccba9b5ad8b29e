//! Typed access to settings-document metadata
//!
//! The settings overlay stores nearly everything as `key`/`value` strings and
//! often repeats a structural attribute as metadata (`plater_id`, `object_id`,
//! ...). The accessors here centralize which source wins and what the
//! fallback is, so the assembler never compares metadata keys itself.
//!
//! Rules:
//! - lookups are exact and case-sensitive; the first matching entry wins
//! - metadata overrides a structural attribute when it is present and usable
//! - empty names count as absent

use crate::model::{MetadataEntry, ModelInstance, ObjectMeta, PartMeta, Plate};

/// Metadata keys read from the settings document
pub mod keys {
    /// Display name of an object or part
    pub const NAME: &str = "name";
    /// Original mesh file of a part
    pub const SOURCE_FILE: &str = "source_file";
    /// 1-based extruder slot of an object or part
    pub const EXTRUDER: &str = "extruder";
    /// Plate ID override
    pub const PLATER_ID: &str = "plater_id";
    /// Plate name override
    pub const PLATER_NAME: &str = "plater_name";
    /// Instance object ID override
    pub const OBJECT_ID: &str = "object_id";
    /// Instance ID override
    pub const INSTANCE_ID: &str = "instance_id";
}

/// Object name the slicer gives to multi-part groupings
pub const ASSEMBLY_NAME: &str = "Assembly";

/// First value stored under `key`
///
/// # Example
///
/// ```
/// use threemf_analyzer::metadata::lookup;
/// use threemf_analyzer::model::MetadataEntry;
///
/// let entries = vec![
///     MetadataEntry::new("name", "Bracket"),
///     MetadataEntry::new("name", "Ignored"),
/// ];
/// assert_eq!(lookup(&entries, "name"), Some("Bracket"));
/// assert_eq!(lookup(&entries, "Name"), None);
/// ```
pub fn lookup<'a>(entries: &'a [MetadataEntry], key: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|e| e.key == key)
        .map(|e| e.value.as_str())
}

fn lookup_non_empty<'a>(entries: &'a [MetadataEntry], key: &str) -> Option<&'a str> {
    lookup(entries, key).filter(|v| !v.is_empty())
}

fn lookup_id(entries: &[MetadataEntry], key: &str) -> Option<usize> {
    lookup(entries, key).and_then(|v| v.trim().parse().ok())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ObjectMeta {
    /// Name declared on the object itself: `name` metadata, then the attribute
    pub fn own_name(&self) -> Option<&str> {
        lookup_non_empty(&self.metadata, keys::NAME).or_else(|| non_empty(&self.name))
    }

    /// Object name without a synthetic fallback.
    ///
    /// The object's own name wins; an object with exactly one part borrows
    /// that part's name.
    pub fn resolved_name(&self) -> Option<&str> {
        self.own_name().or_else(|| match self.parts.as_slice() {
            [only] => only.resolved_name(),
            _ => None,
        })
    }

    /// Object name, falling back to `Object_<id>`
    pub fn display_name(&self) -> String {
        self.resolved_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Object_{}", self.id))
    }

    /// Slicer grouping heuristic: named `Assembly` and made of several parts.
    ///
    /// Only consulted when the model document does not say whether the
    /// object is a mesh or an assembly.
    pub fn is_assembly(&self) -> bool {
        self.own_name() == Some(ASSEMBLY_NAME) && self.parts.len() > 1
    }

    /// Extruder slot: object metadata, else the single part's metadata
    pub fn extruder(&self) -> Option<usize> {
        lookup_id(&self.metadata, keys::EXTRUDER).or_else(|| match self.parts.as_slice() {
            [only] => only.extruder(),
            _ => None,
        })
    }
}

impl PartMeta {
    /// Part name without a synthetic fallback: metadata, then attribute
    pub fn resolved_name(&self) -> Option<&str> {
        lookup_non_empty(&self.metadata, keys::NAME).or_else(|| non_empty(&self.name))
    }

    /// Part name, falling back to `Part_<id>`
    pub fn display_name(&self) -> String {
        self.resolved_name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Part_{}", self.id))
    }

    /// Original mesh file: metadata, then attribute. No synthetic fallback.
    pub fn source_file(&self) -> Option<&str> {
        lookup_non_empty(&self.metadata, keys::SOURCE_FILE).or_else(|| non_empty(&self.source_file))
    }

    /// Extruder slot from part metadata
    pub fn extruder(&self) -> Option<usize> {
        lookup_id(&self.metadata, keys::EXTRUDER)
    }
}

impl ModelInstance {
    /// Object ID: `object_id` metadata, then the attribute, then 0
    pub fn resolved_object_id(&self) -> usize {
        lookup_id(&self.metadata, keys::OBJECT_ID)
            .or(self.object_id)
            .unwrap_or(0)
    }

    /// Instance ID: `instance_id` metadata, then the attribute, then 0
    pub fn resolved_instance_id(&self) -> usize {
        lookup_id(&self.metadata, keys::INSTANCE_ID)
            .or(self.instance_id)
            .unwrap_or(0)
    }
}

impl Plate {
    /// Plate ID: `plater_id` metadata, then the attribute, then 0
    pub fn resolved_id(&self) -> usize {
        lookup_id(&self.metadata, keys::PLATER_ID)
            .or(self.plater_id)
            .unwrap_or(0)
    }

    /// Plate name: `plater_name` metadata, then the attribute, then empty
    pub fn resolved_name(&self) -> String {
        lookup_non_empty(&self.metadata, keys::PLATER_NAME)
            .or_else(|| non_empty(&self.plater_name))
            .unwrap_or_default()
            .to_string()
    }
}
