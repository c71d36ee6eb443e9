#![no_main]

use libfuzzer_sys::fuzz_target;
use berval::SyncDoneValue;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = SyncDoneValue::decode(data) {
        // Whatever decoded must survive a round trip.
        let encoded = value.to_bytes();
        assert_eq!(SyncDoneValue::decode(&encoded), Ok(value));
    }
});
