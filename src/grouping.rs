//! Grouping of identical objects on a plate
//!
//! Objects sharing a name and kind collapse into one [`GroupedObject`] with a
//! count. The first member seeds the material and component list.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::model::{GroupedObject, ObjectKind, PlateObject};

/// Identity of a group: object name and kind
pub type GroupKey = (String, ObjectKind);

/// Group objects by (name, kind) in a single pass
///
/// Member ID lists follow the input order. Map iteration order is
/// unspecified; use [`group_objects_sorted`] for stable output.
///
/// # Example
///
/// ```
/// use threemf_analyzer::grouping::group_objects;
/// use threemf_analyzer::model::{ObjectKind, PlateObject};
/// use threemf_analyzer::Transform3D;
///
/// let bolt = |id| PlateObject {
///     id,
///     name: "Bolt".to_string(),
///     kind: ObjectKind::Mesh,
///     material: None,
///     position: Transform3D::identity(),
///     printable: true,
///     components: Vec::new(),
/// };
/// let groups = group_objects(&[bolt(4), bolt(7)]);
/// let group = &groups[&("Bolt".to_string(), ObjectKind::Mesh)];
/// assert_eq!(group.count, 2);
/// assert_eq!(group.object_ids, vec![4, 7]);
/// ```
pub fn group_objects(objects: &[PlateObject]) -> HashMap<GroupKey, GroupedObject> {
    let mut groups: HashMap<GroupKey, GroupedObject> = HashMap::new();

    for object in objects {
        match groups.entry((object.name.clone(), object.kind)) {
            Entry::Occupied(mut entry) => {
                let group = entry.get_mut();
                group.count += 1;
                group.object_ids.push(object.id);
            }
            Entry::Vacant(entry) => {
                entry.insert(GroupedObject {
                    name: object.name.clone(),
                    kind: object.kind,
                    material: object.material.clone(),
                    count: 1,
                    components: object.components.clone(),
                    object_ids: vec![object.id],
                });
            }
        }
    }

    groups
}

/// Group objects and sort the groups by (name, kind)
pub fn group_objects_sorted(objects: &[PlateObject]) -> Vec<GroupedObject> {
    let mut groups: Vec<(GroupKey, GroupedObject)> = group_objects(objects).into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| a.cmp(b));
    groups.into_iter().map(|(_, group)| group).collect()
}
