#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(flat) = capconf::input::parse_json_flat(content, Path::new("fuzz.json")) {
            let result = capconf::parse_flat_config(&flat);
            let _ = capconf::validate_parse_result(&result);
        }
    }
});
