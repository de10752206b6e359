#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(settings) = codigestion_kinetics::Settings::from_toml_str(text) {
            let _ = settings.parameter_table();
        }
    }
});
