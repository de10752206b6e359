#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(result) = codigestion_kinetics::io::read_json_from_bytes(data) {
        let _ = result.max_production_rate();
    }
});
