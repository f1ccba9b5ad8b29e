//! Data structures for package documents and resolved reports

mod document;
mod project;
mod report;
mod settings;

// Raw model documents
pub use document::{
    BuildItem, ComponentRef, ComponentsCollection, Mesh, ModelDocument, ModelObject, Triangle,
    Vertex,
};

// Settings overlay
pub use settings::{MetadataEntry, ModelInstance, ObjectMeta, PartMeta, Plate, SettingsDocument};

// Slicer project settings
pub use project::ProjectSettings;

// Resolved output
pub use report::{
    ComponentInfo, GroupedObject, ObjectKind, ParsedPackage, PlateInfo, PlateObject,
};
