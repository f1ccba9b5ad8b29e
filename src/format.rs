//! Text and CSV renderings of a [`ParsedPackage`]
//!
//! JSON output needs no formatter: the report types derive `Serialize`.

use std::borrow::Cow;
use std::io::Write;

use crate::error::Result;
use crate::grouping::group_objects_sorted;
use crate::model::{ObjectKind, ParsedPackage};

/// CSV column headers, one row per object group
pub const CSV_HEADERS: [&str; 9] = [
    "PlateID",
    "PlateName",
    "ObjectName",
    "ObjectType",
    "Material",
    "Count",
    "ComponentCount",
    "ComponentNames",
    "ComponentFiles",
];

/// Strip a trailing parenthesized suffix from a filament name, then trim
///
/// The suffix must end the string: trailing whitespace after `)` keeps it.
///
/// ```
/// use threemf_analyzer::format::clean_material_name;
///
/// assert_eq!(clean_material_name("Eryone ASA-GF(opengrid-9x9.3mf)"), "Eryone ASA-GF");
/// assert_eq!(clean_material_name("PLA (Matte) Black"), "PLA (Matte) Black");
/// ```
pub fn clean_material_name(material: &str) -> &str {
    if let Some(inner) = material.strip_suffix(')') {
        // The suffix starts at the first '(' after any earlier ')'
        let start = inner.rfind(')').map_or(0, |p| p + 1);
        if let Some(open) = inner[start..].find('(') {
            return inner[..start + open].trim();
        }
    }
    material.trim()
}

/// Write the human-readable report
pub fn write_text<W: Write>(package: &ParsedPackage, writer: &mut W) -> Result<()> {
    writeln!(writer, "3MF File Analysis")?;
    writeln!(writer, "=================")?;
    writeln!(writer)?;

    if package.plates.is_empty() {
        writeln!(writer, "No plates found in the file.")?;
        return Ok(());
    }

    for plate in &package.plates {
        writeln!(writer, "Plate {}: {}", plate.plate_id, plate.plate_name)?;

        if plate.objects.is_empty() {
            writeln!(writer, "  No objects on this plate.")?;
            continue;
        }

        for group in group_objects_sorted(&plate.objects) {
            let material = clean_material_name(group.material.as_deref().unwrap_or_default());
            write!(writer, "  {} x {}; {}", group.count, group.name, material)?;
            if group.kind == ObjectKind::Assembly {
                write!(writer, " (assembly)")?;
            }
            writeln!(writer)?;

            if group.kind == ObjectKind::Assembly && !group.components.is_empty() {
                writeln!(writer, "    Components:")?;
                for component in &group.components {
                    writeln!(
                        writer,
                        "      - {} (ID: {}, Source: {})",
                        component.name,
                        component.id,
                        component.source_file.as_deref().unwrap_or_default()
                    )?;
                }
            }
        }
        writeln!(writer)?;
    }

    let materials: std::collections::BTreeSet<&str> = package
        .materials()
        .into_iter()
        .map(clean_material_name)
        .collect();
    if !materials.is_empty() {
        writeln!(writer, "Materials Used:")?;
        writeln!(writer, "===============")?;
        for material in materials {
            writeln!(writer, "- {}", material)?;
        }
    }

    Ok(())
}

/// Write the CSV report
///
/// Plates without objects produce a single row with zero counts.
pub fn write_csv<W: Write>(package: &ParsedPackage, writer: &mut W) -> Result<()> {
    write_record(writer, &CSV_HEADERS)?;

    for plate in &package.plates {
        let plate_id = plate.plate_id.to_string();

        if plate.objects.is_empty() {
            write_record(
                writer,
                &[&plate_id, &plate.plate_name, "", "", "", "0", "0", "", ""],
            )?;
            continue;
        }

        for group in group_objects_sorted(&plate.objects) {
            let names: Vec<&str> = group.components.iter().map(|c| c.name.as_str()).collect();
            let files: Vec<&str> = group
                .components
                .iter()
                .map(|c| c.source_file.as_deref().unwrap_or_default())
                .collect();

            write_record(
                writer,
                &[
                    &plate_id,
                    &plate.plate_name,
                    &group.name,
                    group.kind.as_str(),
                    clean_material_name(group.material.as_deref().unwrap_or_default()),
                    &group.count.to_string(),
                    &group.components.len().to_string(),
                    &names.join(";"),
                    &files.join(";"),
                ],
            )?;
        }
    }

    Ok(())
}

fn write_record<W: Write>(writer: &mut W, fields: &[&str]) -> Result<()> {
    let line: Vec<Cow<'_, str>> = fields.iter().map(|f| csv_field(f)).collect();
    writeln!(writer, "{}", line.join(","))?;
    Ok(())
}

/// Quote a field when it contains a delimiter, quote or line break
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) || field.starts_with(' ') {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
