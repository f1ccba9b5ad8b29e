//! Filament list from `Metadata/project_settings.config`

use serde::Deserialize;

/// The subset of the slicer project settings used for material reporting
///
/// The file is a flat JSON object with several hundred keys; only the
/// per-filament arrays are read, everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectSettings {
    /// Filament profile names, one per extruder slot
    #[serde(default)]
    pub filament_settings_id: Vec<String>,
    /// Filament types (`PLA`, `PETG`, ...), one per extruder slot
    #[serde(default)]
    pub filament_type: Vec<String>,
}

impl ProjectSettings {
    /// Material loaded in a 1-based extruder slot
    ///
    /// Prefers the filament profile name and falls back to the filament type.
    pub fn material_for_extruder(&self, extruder: usize) -> Option<&str> {
        let index = extruder.checked_sub(1)?;
        non_empty_slot(&self.filament_settings_id, index)
            .or_else(|| non_empty_slot(&self.filament_type, index))
    }
}

fn non_empty_slot(list: &[String], index: usize) -> Option<&str> {
    list.get(index)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}
