//! Model document parsing (`3D/3dmodel.model` and sub-assembly files)

use crate::error::{Error, Result};
use crate::model::{
    BuildItem, ComponentRef, ComponentsCollection, Mesh, ModelDocument, ModelObject, Triangle,
    Vertex,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{
    XML_BUFFER_CAPACITY, element_name, get_attr_by_local_name, get_local_name, parse_attributes,
    parse_bool, parse_id_or_zero,
};

/// Parse a model document from its XML text
///
/// Only the parts of the core schema the analyzer reports on are kept:
/// objects with their mesh or component list, and build items. Extension
/// elements and document metadata are skipped.
#[doc(hidden)]
pub fn parse_model_xml(xml: &str) -> Result<ModelDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut document = ModelDocument::new();
    let mut buf = Vec::with_capacity(XML_BUFFER_CAPACITY);
    let mut in_resources = false;
    let mut in_build = false;
    let mut in_components = false;
    let mut current_object: Option<ModelObject> = None;
    let mut current_mesh: Option<Mesh> = None;

    loop {
        let event_result = reader.read_event_into(&mut buf);
        let is_empty_element = matches!(&event_result, Ok(Event::Empty(_)));

        match event_result {
            Ok(Event::DocType(_)) => {
                return Err(Error::InvalidXml(
                    "DTD declarations are not allowed in 3MF files".to_string(),
                ));
            }
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                match element_name(e)?.as_str() {
                    "model" => {
                        let attrs = parse_attributes(e)?;
                        if let Some(unit) = attrs.get("unit") {
                            document.unit = unit.clone();
                        }
                    }
                    "resources" => in_resources = !is_empty_element,
                    "build" => in_build = !is_empty_element,
                    "object" if in_resources => {
                        let object = parse_object(e)?;
                        if is_empty_element {
                            document.resources.push(object);
                        } else {
                            current_object = Some(object);
                        }
                    }
                    "mesh" if current_object.is_some() => {
                        current_mesh = Some(Mesh::new());
                    }
                    "vertex" => {
                        if let Some(ref mut mesh) = current_mesh {
                            mesh.vertices.push(parse_vertex(e)?);
                        }
                    }
                    "triangle" => {
                        if let Some(ref mut mesh) = current_mesh {
                            mesh.triangles.push(parse_triangle(e)?);
                        }
                    }
                    "components" => {
                        if let Some(ref mut obj) = current_object {
                            obj.components.get_or_insert_with(ComponentsCollection::default);
                            in_components = !is_empty_element;
                        }
                    }
                    "component" if in_components => {
                        let component = parse_component(e)?;
                        if let Some(components) =
                            current_object.as_mut().and_then(|o| o.components.as_mut())
                        {
                            components.components.push(component);
                        }
                    }
                    "item" if in_build => {
                        document.build.push(parse_build_item(e)?);
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let name_str = std::str::from_utf8(name.as_ref())
                    .map_err(|e| Error::InvalidXml(e.to_string()))?;

                match get_local_name(name_str) {
                    "resources" => in_resources = false,
                    "build" => in_build = false,
                    "components" => in_components = false,
                    "object" => {
                        if let Some(mut obj) = current_object.take() {
                            if let Some(mesh) = current_mesh.take() {
                                obj.mesh = Some(mesh);
                            }
                            document.resources.push(obj);
                        }
                        in_components = false;
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if current_object.is_some() {
        return Err(Error::InvalidXml(
            "Document ended inside an <object> element".to_string(),
        ));
    }

    Ok(document)
}

fn parse_object(e: &BytesStart) -> Result<ModelObject> {
    let attrs = parse_attributes(e)?;
    let mut object = ModelObject::new(parse_id_or_zero(&attrs, "object", "id")?);
    object.name = attrs.get("name").cloned();
    object.object_type = attrs.get("type").cloned();
    Ok(object)
}

fn parse_vertex(e: &BytesStart) -> Result<Vertex> {
    let attrs = parse_attributes(e)?;
    let coord = |key: &str| -> Result<f64> {
        let Some(value) = attrs.get(key) else {
            return Ok(0.0);
        };
        value.trim().parse::<f64>().map_err(|_| {
            Error::parse_error_with_context(&format!("vertex {}", key), value, "number")
        })
    };
    Ok(Vertex::new(coord("x")?, coord("y")?, coord("z")?))
}

fn parse_triangle(e: &BytesStart) -> Result<Triangle> {
    let attrs = parse_attributes(e)?;
    Ok(Triangle::new(
        parse_id_or_zero(&attrs, "triangle", "v1")?,
        parse_id_or_zero(&attrs, "triangle", "v2")?,
        parse_id_or_zero(&attrs, "triangle", "v3")?,
    ))
}

fn parse_component(e: &BytesStart) -> Result<ComponentRef> {
    let attrs = parse_attributes(e)?;
    let mut component = ComponentRef::new(parse_id_or_zero(&attrs, "component", "objectid")?);
    component.transform = attrs.get("transform").cloned();
    // Production extension path, written as p:path by Bambu/Orca
    component.path = get_attr_by_local_name(&attrs, "path").map(str::to_string);
    Ok(component)
}

fn parse_build_item(e: &BytesStart) -> Result<BuildItem> {
    let attrs = parse_attributes(e)?;
    let mut item = BuildItem::new(parse_id_or_zero(&attrs, "item", "objectid")?);
    item.transform = attrs.get("transform").cloned();
    item.printable = attrs
        .get("printable")
        .map(|v| parse_bool("item printable", v))
        .transpose()?;
    Ok(item)
}
