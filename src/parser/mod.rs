//! Readers for the documents inside an extracted package
//!
//! Each reader checks that its document exists, reads it and deserializes it
//! with an event-driven `quick-xml` pass (or `serde_json` for the project
//! settings). Missing documents surface as [`Error::MissingFile`]; read and
//! parse failures are wrapped in [`Error::Document`] naming the document.

mod model;
mod settings;

use crate::archive::{MODEL_PATH, PROJECT_SETTINGS_PATH, SETTINGS_PATH, resolve_in};
use crate::error::{Error, Result};
use crate::model::{ModelDocument, ProjectSettings, SettingsDocument};
use quick_xml::events::BytesStart;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub use model::parse_model_xml;
pub use settings::parse_settings_xml;

/// Default buffer capacity for XML parsing (4KB)
const XML_BUFFER_CAPACITY: usize = 4096;

/// Read `3D/3dmodel.model` from an extracted package
pub fn read_model_document(root: &Path) -> Result<ModelDocument> {
    read_document(root, MODEL_PATH, parse_model_xml)
}

/// Read `Metadata/model_settings.config` from an extracted package
pub fn read_settings_document(root: &Path) -> Result<SettingsDocument> {
    read_document(root, SETTINGS_PATH, parse_settings_xml)
}

/// Read a sub-assembly model document referenced by a component path
///
/// `relative` is resolved against the package root; a leading `/` is allowed.
pub fn read_assembly_document(root: &Path, relative: &str) -> Result<ModelDocument> {
    read_document(root, relative, parse_model_xml)
}

/// Read `Metadata/project_settings.config`, if the package has one
pub fn read_project_settings(root: &Path) -> Result<Option<ProjectSettings>> {
    let path = root.join(PROJECT_SETTINGS_PATH);
    if !path.is_file() {
        return Ok(None);
    }

    let bytes =
        fs::read(&path).map_err(|e| Error::in_document(PROJECT_SETTINGS_PATH, e.into()))?;
    let settings = serde_json::from_slice(&bytes)
        .map_err(|e| Error::in_document(PROJECT_SETTINGS_PATH, e.into()))?;
    tracing::debug!(document = PROJECT_SETTINGS_PATH, "loaded project settings");
    Ok(Some(settings))
}

fn read_document<T>(root: &Path, relative: &str, parse: fn(&str) -> Result<T>) -> Result<T> {
    let path = resolve_in(root, relative)
        .filter(|p| p.is_file())
        .ok_or_else(|| {
            let expected = root.join(relative.trim_start_matches('/'));
            Error::MissingFile(expected.display().to_string())
        })?;

    let bytes = fs::read(&path).map_err(|e| Error::in_document(relative, e.into()))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        Error::in_document(relative, Error::InvalidXml(format!("Invalid UTF-8: {}", e)))
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let document = parse(text).map_err(|e| Error::in_document(relative, e))?;
    tracing::debug!(document = relative, "parsed document");
    Ok(document)
}

/// Extract local name from potentially namespaced XML name
///
/// - `"p:path"` returns `"path"`
/// - `"object"` returns `"object"`
pub(crate) fn get_local_name(name_str: &str) -> &str {
    match name_str.rfind(':') {
        Some(pos) => &name_str[pos + 1..],
        None => name_str,
    }
}

/// Get an attribute value by its local name, regardless of namespace prefix
///
/// Bambu Studio writes `p:path`, other producers use different prefixes for
/// the same production-extension attribute.
pub(crate) fn get_attr_by_local_name<'a>(
    attrs: &'a HashMap<String, String>,
    local_name: &str,
) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| get_local_name(key) == local_name)
        .map(|(_, value)| value.as_str())
}

/// Parse attributes from an XML element, unescaping values
pub(crate) fn parse_attributes(e: &BytesStart) -> Result<HashMap<String, String>> {
    let mut attrs = HashMap::with_capacity(8);

    for attr in e.attributes() {
        let attr = attr?;
        let key =
            std::str::from_utf8(attr.key.as_ref()).map_err(|e| Error::InvalidXml(e.to_string()))?;
        let raw =
            std::str::from_utf8(&attr.value).map_err(|e| Error::InvalidXml(e.to_string()))?;
        let value = quick_xml::escape::unescape(raw)?;

        attrs.insert(key.to_string(), value.into_owned());
    }

    Ok(attrs)
}

/// Local element name of a start/empty tag
pub(crate) fn element_name(e: &BytesStart) -> Result<String> {
    let name = e.name();
    let name_str =
        std::str::from_utf8(name.as_ref()).map_err(|e| Error::InvalidXml(e.to_string()))?;
    Ok(get_local_name(name_str).to_string())
}

/// Parse an ID-like attribute value
pub(crate) fn parse_id(field: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::parse_error_with_context(field, value, "non-negative integer"))
}

/// Parse an optional ID-like attribute
pub(crate) fn parse_opt_id(
    attrs: &HashMap<String, String>,
    key: &str,
    field: &str,
) -> Result<Option<usize>> {
    attrs.get(key).map(|v| parse_id(field, v)).transpose()
}

/// Parse an ID-like attribute, reading an absent attribute as 0
pub(crate) fn parse_id_or_zero(
    attrs: &HashMap<String, String>,
    element: &str,
    key: &str,
) -> Result<usize> {
    match attrs.get(key) {
        Some(value) => parse_id(&format!("{} {}", element, key), value),
        None => Ok(0),
    }
}

/// Parse a boolean attribute value (`1`/`0`, `true`/`false` in any common case)
pub(crate) fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "1" | "t" | "T" | "true" | "True" | "TRUE" => Ok(true),
        "0" | "f" | "F" | "false" | "False" | "FALSE" => Ok(false),
        _ => Err(Error::parse_error_with_context(field, value, "boolean")),
    }
}
