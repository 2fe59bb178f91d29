#![no_main]

use bcr_openssl::{IntegrityAlgorithm, IntegrityHash};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every computed fingerprint must parse back
    let hash = IntegrityHash::from_bytes(IntegrityAlgorithm::Sha256, data);
    assert_eq!(IntegrityHash::parse(hash.as_str()).unwrap(), hash);

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = IntegrityHash::parse(text);
    }
});
