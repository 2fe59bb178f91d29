#![no_main]

use bcr_openssl::ReleaseTag;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(tag) = raw.parse::<ReleaseTag>() {
            let _ = tag.upstream().map(|v| v.compatibility_level());
            if let Some(previous) = tag.previous() {
                // A predecessor is always one iteration lower
                assert_eq!(previous.bcr_iteration().map(|i| i + 1), tag.bcr_iteration());
            }
        }
    }
});
