#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed model documents must surface as errors, never panics
    if let Ok(xml) = std::str::from_utf8(data) {
        let _ = threemf_analyzer::parser::parse_model_xml(xml);
    }
});
