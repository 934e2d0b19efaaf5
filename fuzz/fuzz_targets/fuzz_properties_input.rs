#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let path = Path::new("fuzz.properties");
        if let Ok(flat) = capconf::input::parse_properties(content, path) {
            let result = capconf::parse_flat_config(&flat);
            let _ = capconf::validate_parse_result(&result);
            let _ = capconf::to_flat_config(&result);
        }
    }
});
