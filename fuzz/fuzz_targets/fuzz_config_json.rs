#![no_main]

use libfuzzer_sys::fuzz_target;
use sdrboost::config::BoostConfig;

fuzz_target!(|data: &[u8]| {
    // Config files are user-edited; parsing must never panic
    if let Ok(s) = std::str::from_utf8(data) {
        let _result: Result<BoostConfig, _> = serde_json::from_str(s);
    }
});
