#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Malformed snapshots must be rejected, not panic
    if let Ok(index) = triesearch::index::snapshot::from_json_str(data) {
        let json = triesearch::index::snapshot::to_json_string(&index).unwrap();
        let _ = triesearch::index::snapshot::from_json_str(&json).unwrap();
    }
});
