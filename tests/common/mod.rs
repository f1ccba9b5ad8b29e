//! Shared fixtures for integration tests
//!
//! Packages are assembled in memory with `ZipWriter` and written into a
//! `tempfile` directory so each test owns its files.

#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
 <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
 <Default Extension="model" ContentType="application/vnd.ms-package.3dmanufacturing-3dmodel+xml"/>
</Types>"#;

/// Main model of the reference project: a mesh bracket and a two-part
/// assembly whose second part points at a file missing from the archive
pub const SCENARIO_MODEL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<model unit="millimeter" xml:lang="en-US" xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02" xmlns:p="http://schemas.microsoft.com/3dmanufacturing/production/2015/06" requiredextensions="p">
 <resources>
  <object id="2" type="model">
   <mesh>
    <vertices>
     <vertex x="0" y="0" z="0"/>
     <vertex x="20" y="0" z="0"/>
     <vertex x="0" y="20" z="0"/>
     <vertex x="0" y="0" z="5"/>
    </vertices>
    <triangles>
     <triangle v1="0" v2="2" v3="1"/>
     <triangle v1="0" v2="1" v3="3"/>
     <triangle v1="1" v2="2" v3="3"/>
     <triangle v1="2" v2="0" v3="3"/>
    </triangles>
   </mesh>
  </object>
  <object id="3" type="model">
   <components>
    <component p:path="/3D/Objects/object_1.model" objectid="1" transform="1 0 0 0 1 0 0 0 1 -5 0 0"/>
    <component p:path="/3D/Objects/object_2.model" objectid="2" transform="1 0 0 0 1 0 0 0 1 5 0 0"/>
   </components>
  </object>
 </resources>
 <build>
  <item objectid="2" transform="1 0 0 0 1 0 0 0 1 100 100 0" printable="1"/>
  <item objectid="3" transform="1 0 0 0 1 0 0 0 1 140 100 0" printable="1"/>
 </build>
</model>"#;

pub const SCENARIO_SETTINGS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<config>
  <object id="2">
    <metadata key="name" value="Bracket"/>
    <metadata key="extruder" value="1"/>
    <part id="1" subtype="normal_part">
      <metadata key="name" value="bracket.stl"/>
    </part>
  </object>
  <object id="3">
    <metadata key="name" value="Assembly"/>
    <metadata key="extruder" value="2"/>
    <part id="1" subtype="normal_part"><metadata key="name" value="Left"/></part>
    <part id="2" subtype="normal_part"><metadata key="name" value="Right"/></part>
  </object>
  <plate>
    <metadata key="plater_id" value="1"/>
    <metadata key="plater_name" value="Plate 1"/>
    <model_instance>
      <metadata key="object_id" value="2"/>
      <metadata key="instance_id" value="0"/>
    </model_instance>
    <model_instance>
      <metadata key="object_id" value="3"/>
      <metadata key="instance_id" value="0"/>
    </model_instance>
  </plate>
</config>"#;

pub const SCENARIO_SUB_ASSEMBLY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<model unit="millimeter" xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02">
 <resources>
  <object id="1" name="Left shell" type="model">
   <mesh>
    <vertices><vertex x="0" y="0" z="0"/><vertex x="1" y="0" z="0"/><vertex x="0" y="1" z="0"/></vertices>
    <triangles><triangle v1="0" v2="1" v3="2"/></triangles>
   </mesh>
  </object>
 </resources>
 <build/>
</model>"#;

pub const SCENARIO_PROJECT: &str =
    r#"{"filament_settings_id": ["Bambu PLA Basic @BBL X1C", "Generic PETG(spool 2)"], "filament_type": ["PLA", "PETG"], "layer_height": "0.2"}"#;

/// Entries of the reference project
pub fn scenario_entries() -> Vec<(&'static str, &'static str)> {
    vec![
        ("[Content_Types].xml", CONTENT_TYPES),
        ("3D/3dmodel.model", SCENARIO_MODEL),
        ("3D/Objects/object_1.model", SCENARIO_SUB_ASSEMBLY),
        ("Metadata/model_settings.config", SCENARIO_SETTINGS),
        ("Metadata/project_settings.config", SCENARIO_PROJECT),
    ]
}

/// Write a package with the given entries into `dir`
pub fn write_package(dir: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default();
    for (entry, content) in entries {
        zip.start_file(*entry, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}

/// Entries of `base` with `name` replaced, or removed when `content` is `None`
pub fn with_entry<'a>(
    base: &[(&'a str, &'a str)],
    name: &'a str,
    content: Option<&'a str>,
) -> Vec<(&'a str, &'a str)> {
    let mut entries: Vec<(&str, &str)> = base.iter().filter(|(n, _)| *n != name).copied().collect();
    if let Some(content) = content {
        entries.push((name, content));
    }
    entries
}

/// Number of entries in a directory
pub fn entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}
