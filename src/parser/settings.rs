//! Settings overlay parsing (`Metadata/model_settings.config`)

use crate::error::{Error, Result};
use crate::model::{MetadataEntry, ModelInstance, ObjectMeta, PartMeta, Plate, SettingsDocument};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{
    XML_BUFFER_CAPACITY, element_name, get_local_name, parse_attributes, parse_opt_id,
    parse_id_or_zero,
};

/// Parse the settings overlay from its XML text
///
/// `<metadata>` entries attach to the innermost open record: instance, then
/// part, then plate, then object. Entries outside any record (and the
/// `<assemble>` section) are ignored.
#[doc(hidden)]
pub fn parse_settings_xml(xml: &str) -> Result<SettingsDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut document = SettingsDocument::new();
    let mut buf = Vec::with_capacity(XML_BUFFER_CAPACITY);
    let mut current_object: Option<ObjectMeta> = None;
    let mut current_part: Option<PartMeta> = None;
    let mut current_plate: Option<Plate> = None;
    let mut current_instance: Option<ModelInstance> = None;

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
                    "object" => {
                        let object = parse_object(e)?;
                        if is_empty_element {
                            document.objects.push(object);
                        } else {
                            current_object = Some(object);
                        }
                    }
                    "part" => {
                        let part = parse_part(e)?;
                        if is_empty_element {
                            finish_part(part, &mut current_object, &mut document);
                        } else {
                            current_part = Some(part);
                        }
                    }
                    "plate" => {
                        let plate = parse_plate(e)?;
                        if is_empty_element {
                            document.plates.push(plate);
                        } else {
                            current_plate = Some(plate);
                        }
                    }
                    "model_instance" => {
                        let instance = parse_instance(e)?;
                        if is_empty_element {
                            finish_instance(instance, &mut current_plate, &mut document);
                        } else {
                            current_instance = Some(instance);
                        }
                    }
                    "metadata" => {
                        let entry = parse_metadata(e)?;
                        if let Some(ref mut instance) = current_instance {
                            instance.metadata.push(entry);
                        } else if let Some(ref mut part) = current_part {
                            part.metadata.push(entry);
                        } else if let Some(ref mut plate) = current_plate {
                            plate.metadata.push(entry);
                        } else if let Some(ref mut object) = current_object {
                            object.metadata.push(entry);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                let name_str = std::str::from_utf8(name.as_ref())
                    .map_err(|e| Error::InvalidXml(e.to_string()))?;

                match get_local_name(name_str) {
                    "model_instance" => {
                        if let Some(instance) = current_instance.take() {
                            finish_instance(instance, &mut current_plate, &mut document);
                        }
                    }
                    "part" => {
                        if let Some(part) = current_part.take() {
                            finish_part(part, &mut current_object, &mut document);
                        }
                    }
                    "plate" => {
                        if let Some(plate) = current_plate.take() {
                            document.plates.push(plate);
                        }
                    }
                    "object" => {
                        if let Some(object) = current_object.take() {
                            document.objects.push(object);
                        }
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

    if current_object.is_some() || current_plate.is_some() {
        return Err(Error::InvalidXml(
            "Document ended inside an open <object> or <plate> element".to_string(),
        ));
    }

    Ok(document)
}

fn finish_part(part: PartMeta, object: &mut Option<ObjectMeta>, document: &mut SettingsDocument) {
    match object {
        Some(object) => object.parts.push(part),
        None => document.parts.push(part),
    }
}

fn finish_instance(
    instance: ModelInstance,
    plate: &mut Option<Plate>,
    document: &mut SettingsDocument,
) {
    match plate {
        Some(plate) => plate.instances.push(instance),
        None => document.instances.push(instance),
    }
}

fn parse_object(e: &BytesStart) -> Result<ObjectMeta> {
    let attrs = parse_attributes(e)?;
    let mut object = ObjectMeta::new(parse_id_or_zero(&attrs, "object", "id")?);
    object.name = attrs.get("name").cloned();
    Ok(object)
}

fn parse_part(e: &BytesStart) -> Result<PartMeta> {
    let attrs = parse_attributes(e)?;
    let mut part = PartMeta::new(parse_id_or_zero(&attrs, "part", "id")?);
    part.name = attrs.get("name").cloned();
    part.source_file = attrs.get("source_file").cloned();
    part.subtype = attrs.get("subtype").cloned();
    Ok(part)
}

fn parse_plate(e: &BytesStart) -> Result<Plate> {
    let attrs = parse_attributes(e)?;
    Ok(Plate {
        plater_id: parse_opt_id(&attrs, "plater_id", "plate plater_id")?,
        plater_name: attrs.get("plater_name").cloned(),
        ..Default::default()
    })
}

fn parse_instance(e: &BytesStart) -> Result<ModelInstance> {
    let attrs = parse_attributes(e)?;
    Ok(ModelInstance {
        object_id: parse_opt_id(&attrs, "object_id", "model_instance object_id")?,
        instance_id: parse_opt_id(&attrs, "instance_id", "model_instance instance_id")?,
        identify_id: parse_opt_id(&attrs, "identify_id", "model_instance identify_id")?,
        metadata: Vec::new(),
    })
}

fn parse_metadata(e: &BytesStart) -> Result<MetadataEntry> {
    let attrs = parse_attributes(e)?;
    let key = attrs.get("key").cloned().unwrap_or_default();
    let value = attrs.get("value").cloned().unwrap_or_default();
    Ok(MetadataEntry::new(key, value))
}
