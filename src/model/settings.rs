//! Types for the settings overlay document (`Metadata/model_settings.config`)
//!
//! The overlay is written by Bambu Studio / OrcaSlicer. Almost everything in it
//! is a `<metadata key=".." value=".."/>` pair; the typed accessors that read
//! those pairs live in [`crate::metadata`].

/// A key/value metadata pair from the settings document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    /// Metadata key
    pub key: String,
    /// Metadata value
    pub value: String,
}

impl MetadataEntry {
    /// Create a new metadata entry
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A `<model_instance>` record linking an object to a plate or instance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelInstance {
    /// `object_id` attribute
    pub object_id: Option<usize>,
    /// `instance_id` attribute
    pub instance_id: Option<usize>,
    /// `identify_id` attribute
    pub identify_id: Option<usize>,
    /// Embedded metadata, may override the attributes
    pub metadata: Vec<MetadataEntry>,
}

/// A `<plate>` of the settings document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plate {
    /// `plater_id` attribute
    pub plater_id: Option<usize>,
    /// `plater_name` attribute
    pub plater_name: Option<String>,
    /// Embedded metadata, may override the attributes
    pub metadata: Vec<MetadataEntry>,
    /// Instances placed on this plate
    pub instances: Vec<ModelInstance>,
}

/// A `<part>` of an object in the settings document
#[derive(Debug, Clone, PartialEq)]
pub struct PartMeta {
    /// Part ID
    pub id: usize,
    /// `name` attribute
    pub name: Option<String>,
    /// `source_file` attribute
    pub source_file: Option<String>,
    /// `subtype` attribute (`normal_part`, `modifier_part`, ...)
    pub subtype: Option<String>,
    /// Embedded metadata
    pub metadata: Vec<MetadataEntry>,
}

impl PartMeta {
    /// Create a new part with the given ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            name: None,
            source_file: None,
            subtype: None,
            metadata: Vec::new(),
        }
    }
}

/// An `<object>` of the settings document
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMeta {
    /// Object ID, shared with the model document
    pub id: usize,
    /// `name` attribute
    pub name: Option<String>,
    /// Embedded metadata (`name`, `extruder`, ...)
    pub metadata: Vec<MetadataEntry>,
    /// Parts of the object
    pub parts: Vec<PartMeta>,
}

impl ObjectMeta {
    /// Create a new object with the given ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            name: None,
            metadata: Vec::new(),
            parts: Vec::new(),
        }
    }
}

/// A parsed settings document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDocument {
    /// Plates in document order
    pub plates: Vec<Plate>,
    /// Object overlays in document order
    pub objects: Vec<ObjectMeta>,
    /// Parts declared outside any object
    pub parts: Vec<PartMeta>,
    /// Instances declared outside any plate
    pub instances: Vec<ModelInstance>,
}

impl SettingsDocument {
    /// Create an empty settings document
    pub fn new() -> Self {
        Self::default()
    }

    /// Every part in the document: nested parts first, then top-level parts
    pub fn all_parts(&self) -> impl Iterator<Item = &PartMeta> {
        self.objects
            .iter()
            .flat_map(|o| o.parts.iter())
            .chain(self.parts.iter())
    }
}
