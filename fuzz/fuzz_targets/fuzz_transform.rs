#![no_main]

use libfuzzer_sys::fuzz_target;
use threemf_analyzer::Transform3D;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let transform = Transform3D::parse(&text);
    let _ = transform.translation();
});
