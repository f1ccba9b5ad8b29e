//! Resolved report types produced by the assembler

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::transform::Transform3D;

/// Kind of a build object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// A single triangle mesh
    Mesh,
    /// An object built from components
    Assembly,
}

impl ObjectKind {
    /// Lowercase name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Mesh => "mesh",
            ObjectKind::Assembly => "assembly",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved component of an assembly
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentInfo {
    /// Referenced object ID
    pub id: usize,
    /// Display name
    pub name: String,
    /// External document or original mesh file the part came from
    pub source_file: Option<String>,
    /// Placement relative to the assembly
    pub transform: Transform3D,
}

/// A build item after resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateObject {
    /// Object ID
    pub id: usize,
    /// Display name
    pub name: String,
    /// Mesh or assembly
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Filament assigned to the object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Placement on the plate
    pub position: Transform3D,
    /// Printable flag of the build item
    pub printable: bool,
    /// Components, only ever populated for assemblies
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentInfo>,
}

/// A printing plate and the objects placed on it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateInfo {
    /// Plate ID
    pub plate_id: usize,
    /// Plate display name, possibly empty
    pub plate_name: String,
    /// Objects in build order
    pub objects: Vec<PlateObject>,
}

impl PlateInfo {
    /// Create an empty plate
    pub fn new(plate_id: usize, plate_name: impl Into<String>) -> Self {
        Self {
            plate_id,
            plate_name: plate_name.into(),
            objects: Vec::new(),
        }
    }
}

/// Objects of one plate sharing the same name and kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedObject {
    /// Shared name
    pub name: String,
    /// Shared kind
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Material of the first member
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Number of members
    pub count: usize,
    /// Components of the first member
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentInfo>,
    /// Member object IDs in build order
    pub object_ids: Vec<usize>,
}

/// Everything the analyzer extracts from one package
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedPackage {
    /// Plates in the order selected by [`crate::PlateOrder`]
    pub plates: Vec<PlateInfo>,
}

impl ParsedPackage {
    /// Plate with the given ID
    pub fn plate(&self, plate_id: usize) -> Option<&PlateInfo> {
        self.plates.iter().find(|p| p.plate_id == plate_id)
    }

    /// Total number of objects across all plates
    pub fn object_count(&self) -> usize {
        self.plates.iter().map(|p| p.objects.len()).sum()
    }

    /// Distinct materials used by any object, sorted
    pub fn materials(&self) -> BTreeSet<&str> {
        self.plates
            .iter()
            .flat_map(|p| p.objects.iter())
            .filter_map(|o| o.material.as_deref())
            .filter(|m| !m.is_empty())
            .collect()
    }

    /// Reorder plates by ascending ID
    pub fn sort_by_plate_id(&mut self) {
        self.plates.sort_by_key(|p| p.plate_id);
    }
}
