#![no_main]

use libfuzzer_sys::fuzz_target;
use sdrboost::brightness::{BrightnessLevel, MAX_BRIGHTNESS, MIN_BRIGHTNESS, parse_brightness};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Anything that parses must be finite and must clamp into range
    if let Ok(value) = parse_brightness(s) {
        assert!(value.is_finite());
        let level = BrightnessLevel::clamped(value).value();
        assert!((MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&level));
    }
});
