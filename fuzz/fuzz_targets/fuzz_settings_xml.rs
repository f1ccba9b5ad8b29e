#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(xml) = std::str::from_utf8(data) {
        if let Ok(settings) = threemf_analyzer::parser::parse_settings_xml(xml) {
            // Exercise the metadata accessors on whatever was parsed
            for object in &settings.objects {
                let _ = object.display_name();
                let _ = object.is_assembly();
            }
            for plate in &settings.plates {
                let _ = plate.resolved_id();
                let _ = plate.resolved_name();
            }
        }
    }
});
