#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(bundle) = serde_json::from_slice::<bcr_openssl::HarvestBundle>(data) {
        // Content maps of arbitrary bundles must partition without panicking
        if let Ok(map) = bundle.content_map() {
            let _ = bcr_openssl::partition(&map);
        }
    }
});
