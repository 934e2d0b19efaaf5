#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        let value = capconf::CapacityValue::parse(raw);
        assert_eq!(value.raw(), raw);
        let _ = value.mode();
        let _ = value.is_within_percentage_range();
    }
});
