#![no_main]

use libfuzzer_sys::fuzz_target;
use berval::CertGenerationRequest;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = CertGenerationRequest::decode(data) {
        // Whatever decoded must survive a round trip.
        let encoded = value.to_bytes();
        assert_eq!(CertGenerationRequest::decode(&encoded), Ok(value));
    }
});
