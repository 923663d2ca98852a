#![no_main]
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use unvoid::chess::core::Square;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(square) = Square::try_from(s) {
            // Names of regular files survive formatting.
            if square.x < 26 {
                assert_eq!(Square::try_from(square.to_string().as_str()), Ok(square));
            }
        }
    }
});
