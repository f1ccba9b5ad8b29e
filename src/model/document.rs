//! Types for the 3D model documents (`3D/3dmodel.model` and referenced
//! sub-assembly `*.model` files)

use super::ObjectKind;

/// A 3D vertex with x, y, z coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A triangle defined by three vertex indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triangle {
    /// Index of first vertex
    pub v1: usize,
    /// Index of second vertex
    pub v2: usize,
    /// Index of third vertex
    pub v3: usize,
}

impl Triangle {
    /// Create a new triangle
    pub fn new(v1: usize, v2: usize, v3: usize) -> Self {
        Self { v1, v2, v3 }
    }
}

/// A triangle mesh attached to an object
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// List of vertices
    pub vertices: Vec<Vertex>,
    /// List of triangles
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }
}

/// A reference from an assembly object to one of its parts
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentRef {
    /// ID of the referenced object
    ///
    /// When `path` is set the ID is scoped to the external document, not to
    /// the document holding the component.
    pub object_id: usize,
    /// Raw transform attribute, parsed leniently by [`crate::Transform3D::parse`]
    pub transform: Option<String>,
    /// Path of an external model document (`p:path` in Bambu/Orca packages)
    pub path: Option<String>,
}

impl ComponentRef {
    /// Create a component reference with no transform and no external path
    pub fn new(object_id: usize) -> Self {
        Self {
            object_id,
            transform: None,
            path: None,
        }
    }

    /// External document path, if the attribute is present and non-empty
    pub fn external_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

/// The `<components>` element of an assembly object
#[derive(Debug, Clone, Default)]
pub struct ComponentsCollection {
    /// Components in document order
    pub components: Vec<ComponentRef>,
}

/// An `<object>` in the resources section of a model document
#[derive(Debug, Clone)]
pub struct ModelObject {
    /// Object ID
    pub id: usize,
    /// Declared name attribute
    pub name: Option<String>,
    /// Raw `type` attribute (`model`, `support`, `other`, ...)
    pub object_type: Option<String>,
    /// Mesh data, present for single-mesh objects
    pub mesh: Option<Mesh>,
    /// Component list, present for assemblies
    pub components: Option<ComponentsCollection>,
}

impl ModelObject {
    /// Create a new object with the given ID
    pub fn new(id: usize) -> Self {
        Self {
            id,
            name: None,
            object_type: None,
            mesh: None,
            components: None,
        }
    }

    /// Declared name, ignoring empty attributes
    pub fn declared_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Structural kind: a mesh wins over a components collection.
    ///
    /// Returns `None` for objects that carry neither.
    pub fn kind(&self) -> Option<ObjectKind> {
        if self.mesh.is_some() {
            Some(ObjectKind::Mesh)
        } else if self.components.is_some() {
            Some(ObjectKind::Assembly)
        } else {
            None
        }
    }
}

/// An `<item>` of the build section
#[derive(Debug, Clone, PartialEq)]
pub struct BuildItem {
    /// Reference to object ID
    pub object_id: usize,
    /// Raw transform attribute
    pub transform: Option<String>,
    /// Printable flag; absent means printable
    pub printable: Option<bool>,
}

impl BuildItem {
    /// Create a new build item
    pub fn new(object_id: usize) -> Self {
        Self {
            object_id,
            transform: None,
            printable: None,
        }
    }

    /// Printable flag with the default applied
    pub fn is_printable(&self) -> bool {
        self.printable.unwrap_or(true)
    }
}

/// A parsed model document
#[derive(Debug, Clone)]
pub struct ModelDocument {
    /// Unit of measurement (informational)
    pub unit: String,
    /// Objects of the resources section, in document order
    pub resources: Vec<ModelObject>,
    /// Items of the build section, in document order
    pub build: Vec<BuildItem>,
}

impl ModelDocument {
    /// Create an empty document with the default unit
    pub fn new() -> Self {
        Self {
            unit: "millimeter".to_string(),
            resources: Vec::new(),
            build: Vec::new(),
        }
    }

    /// First resource with the given ID
    pub fn object(&self, id: usize) -> Option<&ModelObject> {
        self.resources.iter().find(|o| o.id == id)
    }

    /// True when the document declares no resources (a placeholder sub-assembly)
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Default for ModelDocument {
    fn default() -> Self {
        Self::new()
    }
}
