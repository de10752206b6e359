#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = codigestion_kinetics::io::read_csv_from_bytes(data);
});
