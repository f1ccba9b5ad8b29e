//! Plate/object assembly
//!
//! Cross-references the build list of the model document with the settings
//! overlay and produces one [`PlateInfo`] per plate. Every per-object problem
//! (dangling build references, unknown plates, broken sub-assembly files,
//! malformed transforms) is absorbed by a fallback; assembly itself never fails.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::archive::{MODEL_EXTENSION, ScratchDir};
use crate::config::{DEFAULT_PLATE_ID, DEFAULT_PLATE_NAME, ParseOptions, PlateFallback, PlateOrder};
use crate::error::{Error, Result};
use crate::model::{
    ComponentInfo, ComponentRef, ModelDocument, ModelObject, ObjectKind, ObjectMeta,
    ParsedPackage, PartMeta, PlateInfo, PlateObject, ProjectSettings, SettingsDocument,
};
use crate::parser::read_assembly_document;
use crate::transform::Transform3D;

/// Extruder assumed for objects without an `extruder` entry
const DEFAULT_EXTRUDER: usize = 1;

/// Loads sub-assembly model documents referenced by component paths
///
/// Implemented for extracted packages; tests and embedders can supply
/// documents from memory instead.
pub trait AssemblySource {
    /// Load the model document at a package-relative path
    fn load_assembly(&self, path: &str) -> Result<ModelDocument>;
}

impl AssemblySource for ScratchDir {
    fn load_assembly(&self, path: &str) -> Result<ModelDocument> {
        read_assembly_document(self.path(), path)
    }
}

impl AssemblySource for HashMap<String, ModelDocument> {
    fn load_assembly(&self, path: &str) -> Result<ModelDocument> {
        let key = path.trim_start_matches('/');
        self.get(key)
            .or_else(|| self.get(path))
            .cloned()
            .ok_or_else(|| Error::MissingFile(key.to_string()))
    }
}

/// Sub-assembly documents loaded during one assembly, keyed by path.
///
/// `None` records a document that was missing or failed to parse.
struct AssemblyCache<'a, S: ?Sized> {
    source: &'a S,
    documents: HashMap<String, Option<ModelDocument>>,
}

impl<'a, S: AssemblySource + ?Sized> AssemblyCache<'a, S> {
    fn new(source: &'a S) -> Self {
        Self {
            source,
            documents: HashMap::new(),
        }
    }

    fn get(&mut self, path: &str) -> Option<&ModelDocument> {
        let source = self.source;
        self.documents
            .entry(path.to_string())
            .or_insert_with(|| match source.load_assembly(path) {
                Ok(document) => Some(document),
                Err(e) => {
                    tracing::debug!(path, error = %e, "sub-assembly treated as empty");
                    None
                }
            })
            .as_ref()
    }
}

/// Per-call lookup tables built from the settings overlay
struct SettingsIndex<'a> {
    objects: HashMap<usize, &'a ObjectMeta>,
    parts: HashMap<usize, &'a PartMeta>,
    /// object ID -> plate ID
    instances: HashMap<usize, usize>,
}

impl<'a> SettingsIndex<'a> {
    fn build(settings: &'a SettingsDocument) -> Self {
        let mut objects = HashMap::with_capacity(settings.objects.len());
        for object in &settings.objects {
            objects.entry(object.id).or_insert(object);
        }

        let mut parts = HashMap::new();
        for part in settings.all_parts() {
            parts.entry(part.id).or_insert(part);
        }

        // Top-level instances carry their instance ID as the plate; instances
        // nested in a plate belong to that plate and take precedence.
        let mut instances = HashMap::new();
        for instance in &settings.instances {
            instances.insert(
                instance.resolved_object_id(),
                instance.resolved_instance_id(),
            );
        }
        for plate in &settings.plates {
            let plate_id = plate.resolved_id();
            for instance in &plate.instances {
                instances.insert(instance.resolved_object_id(), plate_id);
            }
        }

        Self {
            objects,
            parts,
            instances,
        }
    }

    fn part_name(&self, id: usize) -> Option<&'a str> {
        self.parts.get(&id).and_then(|p| p.resolved_name())
    }

    /// Part backing a component: the owning object's own part with that ID,
    /// else the first part with that ID anywhere in the overlay.
    ///
    /// Part IDs restart per object, so the owner is consulted first.
    fn component_part(&self, owner: Option<&'a ObjectMeta>, id: usize) -> Option<&'a PartMeta> {
        owner
            .and_then(|o| o.parts.iter().find(|p| p.id == id))
            .or_else(|| self.parts.get(&id).copied())
    }
}

/// Assemble the plate report from parsed documents
///
/// # Arguments
///
/// * `model` - The main model document
/// * `settings` - The settings overlay
/// * `project` - Project settings used for materials, if available
/// * `source` - Loader for sub-assembly documents
/// * `options` - Plate fallback, ordering and default-plate behavior
pub fn assemble<S: AssemblySource + ?Sized>(
    model: &ModelDocument,
    settings: &SettingsDocument,
    project: Option<&ProjectSettings>,
    source: &S,
    options: &ParseOptions,
) -> ParsedPackage {
    let mut plates: IndexMap<usize, PlateInfo> = IndexMap::with_capacity(settings.plates.len());
    for plate in &settings.plates {
        let id = plate.resolved_id();
        plates
            .entry(id)
            .or_insert_with(|| PlateInfo::new(id, plate.resolved_name()));
    }
    if plates.is_empty() && options.default_plate() {
        plates.insert(
            DEFAULT_PLATE_ID,
            PlateInfo::new(DEFAULT_PLATE_ID, DEFAULT_PLATE_NAME),
        );
    }

    let fallback_plate = match options.plate_fallback() {
        PlateFallback::FirstDeclared => plates.keys().next().copied(),
        PlateFallback::LowestId => plates.keys().min().copied(),
    };

    let index = SettingsIndex::build(settings);

    let mut resources: HashMap<usize, &ModelObject> = HashMap::with_capacity(model.resources.len());
    for object in &model.resources {
        resources.entry(object.id).or_insert(object);
    }

    let mut cache = AssemblyCache::new(source);

    for item in &model.build {
        let Some(object) = resources.get(&item.object_id).copied() else {
            tracing::debug!(object_id = item.object_id, "build item references unknown object");
            continue;
        };

        let meta = index.objects.get(&object.id).copied();
        let name = meta
            .and_then(ObjectMeta::resolved_name)
            .or_else(|| index.part_name(object.id))
            .or_else(|| object.declared_name())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Object_{}", object.id));

        let kind = object.kind().unwrap_or_else(|| {
            if meta.is_some_and(ObjectMeta::is_assembly) {
                ObjectKind::Assembly
            } else {
                ObjectKind::Mesh
            }
        });

        let components = match (kind, object.components.as_ref()) {
            (ObjectKind::Assembly, Some(collection)) => collection
                .components
                .iter()
                .filter_map(|c| resolve_component(c, meta, &index, &mut cache))
                .collect(),
            _ => Vec::new(),
        };

        let material = project.and_then(|project| {
            let extruder = meta
                .and_then(ObjectMeta::extruder)
                .unwrap_or(DEFAULT_EXTRUDER);
            project.material_for_extruder(extruder).map(str::to_string)
        });

        let plate_id = match index.instances.get(&object.id) {
            Some(id) if plates.contains_key(id) => Some(*id),
            assigned => {
                tracing::debug!(
                    object_id = object.id,
                    assigned = ?assigned,
                    fallback = ?fallback_plate,
                    "object placed on fallback plate"
                );
                fallback_plate
            }
        };

        let Some(plate) = plate_id.and_then(|id| plates.get_mut(&id)) else {
            tracing::debug!(object_id = object.id, "no plate available, object dropped");
            continue;
        };

        tracing::trace!(
            object_id = object.id,
            name = %name,
            kind = %kind,
            plate_id = plate.plate_id,
            components = components.len(),
            "resolved build item"
        );

        plate.objects.push(PlateObject {
            id: object.id,
            name,
            kind,
            material,
            position: Transform3D::parse_opt(item.transform.as_deref()),
            printable: item.is_printable(),
            components,
        });
    }

    let mut package = ParsedPackage {
        plates: plates.into_values().collect(),
    };
    if options.plate_order() == PlateOrder::ById {
        package.sort_by_plate_id();
    }
    package
}

/// Resolve one component, or `None` when it points at an empty sub-assembly
fn resolve_component<'a, S: AssemblySource + ?Sized>(
    component: &ComponentRef,
    owner: Option<&'a ObjectMeta>,
    index: &SettingsIndex<'a>,
    cache: &mut AssemblyCache<'_, S>,
) -> Option<ComponentInfo> {
    let id = component.object_id;
    let part = index.component_part(owner, id);
    let mut name = part
        .and_then(PartMeta::resolved_name)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Component_{}", id));

    let external = component.external_path();
    let source_file = external
        .map(str::to_string)
        .or_else(|| part.and_then(PartMeta::source_file).map(str::to_string));

    if let Some(path) = source_file.as_deref().filter(|p| p.ends_with(MODEL_EXTENSION)) {
        let document = cache.get(path).filter(|d| !d.is_empty())?;
        if external.is_some() {
            if let Some(declared) = document.object(id).and_then(ModelObject::declared_name) {
                name = declared.to_string();
            }
        }
    }

    Some(ComponentInfo {
        id,
        name,
        source_file,
        transform: Transform3D::parse_opt(component.transform.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BuildItem, ComponentsCollection, Mesh, MetadataEntry, ModelInstance, Plate,
    };
    use std::cell::Cell;

    fn mesh_object(id: usize, name: Option<&str>) -> ModelObject {
        let mut object = ModelObject::new(id);
        object.name = name.map(str::to_string);
        object.mesh = Some(Mesh::new());
        object
    }

    fn assembly_object(id: usize, components: Vec<ComponentRef>) -> ModelObject {
        let mut object = ModelObject::new(id);
        object.components = Some(ComponentsCollection { components });
        object
    }

    fn external(id: usize, path: &str) -> ComponentRef {
        let mut component = ComponentRef::new(id);
        component.path = Some(path.to_string());
        component
    }

    fn plate(id: usize, name: &str, objects: &[usize]) -> Plate {
        Plate {
            metadata: vec![
                MetadataEntry::new("plater_id", id.to_string()),
                MetadataEntry::new("plater_name", name),
            ],
            instances: objects
                .iter()
                .map(|o| ModelInstance {
                    metadata: vec![MetadataEntry::new("object_id", o.to_string())],
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn named(id: usize, name: &str) -> ObjectMeta {
        let mut object = ObjectMeta::new(id);
        object.metadata.push(MetadataEntry::new("name", name));
        object
    }

    fn model(resources: Vec<ModelObject>, build: &[usize]) -> ModelDocument {
        ModelDocument {
            resources,
            build: build.iter().map(|id| BuildItem::new(*id)).collect(),
            ..Default::default()
        }
    }

    fn sub_assembly(objects: &[(usize, &str)]) -> ModelDocument {
        ModelDocument {
            resources: objects
                .iter()
                .map(|(id, name)| mesh_object(*id, Some(name)))
                .collect(),
            ..Default::default()
        }
    }

    fn no_assemblies() -> HashMap<String, ModelDocument> {
        HashMap::new()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let model = model(
            vec![
                mesh_object(2, None),
                assembly_object(
                    3,
                    vec![
                        external(1, "/3D/Objects/object_1.model"),
                        external(2, "/3D/Objects/missing.model"),
                    ],
                ),
            ],
            &[2, 3],
        );
        let settings = SettingsDocument {
            plates: vec![plate(1, "Plate 1", &[2, 3])],
            objects: vec![named(2, "Bracket"), named(3, "Assembly")],
            ..Default::default()
        };
        let mut source = HashMap::new();
        source.insert(
            "3D/Objects/object_1.model".to_string(),
            sub_assembly(&[(1, "Left half")]),
        );

        let package = assemble(&model, &settings, None, &source, &ParseOptions::default());

        assert_eq!(package.plates.len(), 1);
        let plate = &package.plates[0];
        assert_eq!(plate.plate_id, 1);
        assert_eq!(plate.plate_name, "Plate 1");
        assert_eq!(plate.objects.len(), 2);

        assert_eq!(plate.objects[0].name, "Bracket");
        assert_eq!(plate.objects[0].kind, ObjectKind::Mesh);
        assert!(plate.objects[0].components.is_empty());

        let assembly = &plate.objects[1];
        assert_eq!(assembly.name, "Assembly");
        assert_eq!(assembly.kind, ObjectKind::Assembly);
        assert_eq!(assembly.components.len(), 1);
        assert_eq!(assembly.components[0].name, "Left half");
        assert_eq!(
            assembly.components[0].source_file.as_deref(),
            Some("/3D/Objects/object_1.model")
        );
    }

    #[test]
    fn test_dangling_build_reference_is_skipped() {
        let model = model(vec![mesh_object(1, Some("Cube"))], &[99, 1]);
        let settings = SettingsDocument {
            plates: vec![plate(1, "A", &[1])],
            ..Default::default()
        };
        let package = assemble(&model, &settings, None, &no_assemblies(), &ParseOptions::default());
        assert_eq!(package.object_count(), 1);
        assert_eq!(package.plates[0].objects[0].name, "Cube");
    }

    #[test]
    fn test_name_fallback_chain() {
        let model = model(
            vec![
                mesh_object(1, Some("Declared")),
                mesh_object(2, Some("Declared too")),
                mesh_object(3, None),
                mesh_object(4, Some("")),
            ],
            &[1, 2, 3, 4],
        );
        let mut loose = PartMeta::new(2);
        loose.metadata.push(MetadataEntry::new("name", "From part"));
        let settings = SettingsDocument {
            plates: vec![plate(1, "", &[])],
            objects: vec![named(1, "From settings")],
            parts: vec![loose],
            ..Default::default()
        };

        let package = assemble(&model, &settings, None, &no_assemblies(), &ParseOptions::default());
        let names: Vec<&str> = package.plates[0]
            .objects
            .iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(names, ["From settings", "From part", "Object_3", "Object_4"]);
    }

    #[test]
    fn test_component_without_source_is_kept() {
        let model = model(vec![assembly_object(5, vec![ComponentRef::new(7)])], &[5]);
        let settings = SettingsDocument {
            plates: vec![plate(1, "", &[5])],
            ..Default::default()
        };
        let package = assemble(&model, &settings, None, &no_assemblies(), &ParseOptions::default());
        let components = &package.plates[0].objects[0].components;
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "Component_7");
        assert_eq!(components[0].source_file, None);
        assert!(components[0].transform.is_identity());
    }

    #[test]
    fn test_part_index_supplies_component_name_and_file() {
        let model = model(
            vec![assembly_object(
                5,
                vec![ComponentRef::new(1), ComponentRef::new(2)],
            )],
            &[5],
        );
        let mut object = named(5, "Assembly");
        let mut left = PartMeta::new(1);
        left.metadata.push(MetadataEntry::new("name", "Left"));
        left.metadata.push(MetadataEntry::new("source_file", "left.stl"));
        let mut right = PartMeta::new(2);
        right.metadata.push(MetadataEntry::new("source_file", "/3D/Objects/empty.model"));
        object.parts = vec![left, right];

        let settings = SettingsDocument {
            plates: vec![plate(1, "", &[5])],
            objects: vec![object],
            ..Default::default()
        };
        let mut source = HashMap::new();
        source.insert("3D/Objects/empty.model".to_string(), ModelDocument::new());

        let package = assemble(&model, &settings, None, &source, &ParseOptions::default());
        let components = &package.plates[0].objects[0].components;
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].name, "Left");
        assert_eq!(components[0].source_file.as_deref(), Some("left.stl"));
    }

    #[test]
    fn test_external_placeholder_sub_assembly_is_elided() {
        let model = model(
            vec![assembly_object(
                5,
                vec![
                    external(1, "/3D/Objects/empty.model"),
                    external(2, "/3D/Objects/object_2.model"),
                ],
            )],
            &[5],
        );
        let settings = SettingsDocument {
            plates: vec![plate(1, "", &[5])],
            ..Default::default()
        };
        let mut source = HashMap::new();
        source.insert("3D/Objects/empty.model".to_string(), ModelDocument::new());
        source.insert(
            "3D/Objects/object_2.model".to_string(),
            sub_assembly(&[(2, "Lid")]),
        );

        let package = assemble(&model, &settings, None, &source, &ParseOptions::default());
        let components = &package.plates[0].objects[0].components;
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].id, 2);
        assert_eq!(components[0].name, "Lid");
    }

    #[test]
    fn test_component_names_come_from_owning_object_parts() {
        let model = model(
            vec![
                mesh_object(2, None),
                assembly_object(3, vec![ComponentRef::new(1), ComponentRef::new(2)]),
            ],
            &[2, 3],
        );
        let mut bracket = named(2, "Bracket");
        let mut only = PartMeta::new(1);
        only.metadata.push(MetadataEntry::new("name", "bracket.stl"));
        bracket.parts = vec![only];
        let mut assembly = named(3, "Assembly");
        let mut left = PartMeta::new(1);
        left.metadata.push(MetadataEntry::new("name", "Left"));
        let mut right = PartMeta::new(2);
        right.metadata.push(MetadataEntry::new("name", "Right"));
        assembly.parts = vec![left, right];

        let settings = SettingsDocument {
            plates: vec![plate(1, "", &[2, 3])],
            objects: vec![bracket, assembly],
            ..Default::default()
        };

        let package = assemble(&model, &settings, None, &no_assemblies(), &ParseOptions::default());
        let names: Vec<&str> = package.plates[0].objects[1]
            .components
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["Left", "Right"]);
    }

    #[test]
    fn test_non_model_external_reference_is_kept() {
        let model = model(vec![assembly_object(5, vec![external(1, "/parts/bolt.stl")])], &[5]);
        let settings = SettingsDocument {
            plates: vec![plate(1, "", &[5])],
            ..Default::default()
        };
        let package = assemble(&model, &settings, None, &no_assemblies(), &ParseOptions::default());
        assert_eq!(package.plates[0].objects[0].components.len(), 1);
    }

    struct CountingSource {
        loads: Cell<usize>,
        document: ModelDocument,
    }

    impl AssemblySource for CountingSource {
        fn load_assembly(&self, _path: &str) -> Result<ModelDocument> {
            self.loads.set(self.loads.get() + 1);
            Ok(self.document.clone())
        }
    }

    #[test]
    fn test_sub_assemblies_are_loaded_once() {
        let shared = "/3D/Objects/object_1.model";
        let model = model(
            vec![
                assembly_object(5, vec![external(1, shared), external(2, shared)]),
                assembly_object(6, vec![external(1, shared)]),
            ],
            &[5, 6, 5],
        );
        let settings = SettingsDocument {
            plates: vec![plate(1, "", &[5, 6])],
            ..Default::default()
        };
        let source = CountingSource {
            loads: Cell::new(0),
            document: sub_assembly(&[(1, "A"), (2, "B")]),
        };

        let package = assemble(&model, &settings, None, &source, &ParseOptions::default());
        assert_eq!(package.object_count(), 3);
        assert_eq!(source.loads.get(), 1);
        let names: Vec<&str> = package.plates[0].objects[0]
            .components
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_plate_assignment_and_fallback() {
        let model = model(
            vec![
                mesh_object(1, Some("On two")),
                mesh_object(2, Some("Unassigned")),
                mesh_object(3, Some("Unknown plate")),
            ],
            &[1, 2, 3],
        );
        let settings = SettingsDocument {
            plates: vec![plate(4, "Four", &[]), plate(2, "Two", &[1])],
            instances: vec![ModelInstance {
                object_id: Some(3),
                instance_id: Some(9),
                ..Default::default()
            }],
            ..Default::default()
        };

        let package = assemble(&model, &settings, None, &no_assemblies(), &ParseOptions::default());
        assert_eq!(package.plates[0].plate_id, 4);
        assert_eq!(package.plates[1].plate_id, 2);
        assert_eq!(package.plate(2).unwrap().objects.len(), 1);
        assert_eq!(package.plate(4).unwrap().objects.len(), 2);

        let options = ParseOptions::new()
            .with_plate_fallback(PlateFallback::LowestId)
            .with_plate_order(PlateOrder::ById);
        let package = assemble(&model, &settings, None, &no_assemblies(), &options);
        assert_eq!(package.plates[0].plate_id, 2);
        assert_eq!(package.plate(2).unwrap().objects.len(), 3);
        assert!(package.plate(4).unwrap().objects.is_empty());
    }

    #[test]
    fn test_top_level_instance_maps_instance_id_to_plate() {
        let model = model(vec![mesh_object(1, None), mesh_object(2, None)], &[1, 2]);
        let settings = SettingsDocument {
            plates: vec![plate(1, "", &[]), plate(2, "", &[])],
            instances: vec![ModelInstance {
                object_id: Some(2),
                instance_id: Some(2),
                ..Default::default()
            }],
            ..Default::default()
        };
        let package = assemble(&model, &settings, None, &no_assemblies(), &ParseOptions::default());
        assert_eq!(package.plate(1).unwrap().objects[0].id, 1);
        assert_eq!(package.plate(2).unwrap().objects[0].id, 2);
    }

    #[test]
    fn test_duplicate_plate_ids_keep_first() {
        let model = model(vec![mesh_object(1, None)], &[1]);
        let settings = SettingsDocument {
            plates: vec![plate(1, "First", &[1]), plate(1, "Second", &[])],
            ..Default::default()
        };
        let package = assemble(&model, &settings, None, &no_assemblies(), &ParseOptions::default());
        assert_eq!(package.plates.len(), 1);
        assert_eq!(package.plates[0].plate_name, "First");
        assert_eq!(package.object_count(), 1);
    }

    #[test]
    fn test_no_plates() {
        let model = model(vec![mesh_object(1, None)], &[1]);
        let settings = SettingsDocument::default();

        let package = assemble(&model, &settings, None, &no_assemblies(), &ParseOptions::default());
        assert!(package.plates.is_empty());

        let options = ParseOptions::new().with_default_plate(true);
        let package = assemble(&model, &settings, None, &no_assemblies(), &options);
        assert_eq!(package.plates.len(), 1);
        assert_eq!(package.plates[0].plate_id, 1);
        assert_eq!(package.plates[0].plate_name, "Plate 1");
        assert_eq!(package.plates[0].objects.len(), 1);
    }

    #[test]
    fn test_kind_heuristic_and_position() {
        let mut model = model(vec![ModelObject::new(8), ModelObject::new(9)], &[8, 9]);
        model.build[0].transform = Some("1 0 0 0 1 0 0 0 1 5 6 7".to_string());
        model.build[1].printable = Some(false);

        let mut grouping = named(8, "Assembly");
        grouping.parts = vec![PartMeta::new(1), PartMeta::new(2)];
        let settings = SettingsDocument {
            plates: vec![plate(1, "", &[8, 9])],
            objects: vec![grouping],
            ..Default::default()
        };

        let package = assemble(&model, &settings, None, &no_assemblies(), &ParseOptions::default());
        let objects = &package.plates[0].objects;
        assert_eq!(objects[0].kind, ObjectKind::Assembly);
        assert!(objects[0].components.is_empty());
        assert_eq!(objects[0].position.translation(), [5.0, 6.0, 7.0]);
        assert!(objects[0].printable);
        assert_eq!(objects[1].kind, ObjectKind::Mesh);
        assert!(!objects[1].printable);
    }

    #[test]
    fn test_materials_from_extruder() {
        let model = model(vec![mesh_object(1, None), mesh_object(2, None)], &[1, 2]);
        let mut second = ObjectMeta::new(2);
        second.metadata.push(MetadataEntry::new("extruder", "2"));
        let settings = SettingsDocument {
            plates: vec![plate(1, "", &[1, 2])],
            objects: vec![second],
            ..Default::default()
        };
        let project = ProjectSettings {
            filament_settings_id: vec!["Generic PLA".to_string(), "Generic PETG".to_string()],
            filament_type: Vec::new(),
        };

        let package = assemble(
            &model,
            &settings,
            Some(&project),
            &no_assemblies(),
            &ParseOptions::default(),
        );
        let objects = &package.plates[0].objects;
        assert_eq!(objects[0].material.as_deref(), Some("Generic PLA"));
        assert_eq!(objects[1].material.as_deref(), Some("Generic PETG"));

        let package = assemble(&model, &settings, None, &no_assemblies(), &ParseOptions::default());
        assert!(package.materials().is_empty());
    }
}
