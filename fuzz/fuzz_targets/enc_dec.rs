#![no_main]
use libfuzzer_sys::fuzz_target;
use url_builder::pct_enc::{self, table::UNRESERVED};

fuzz_target!(|data: &str| {
    let encoded = pct_enc::encode(data);

    let mut bytes = encoded.bytes();
    while let Some(x) = bytes.next() {
        if x == b'%' {
            let hi = bytes.next().unwrap();
            let lo = bytes.next().unwrap();
            assert!(hi.is_ascii_hexdigit() && !hi.is_ascii_lowercase());
            assert!(lo.is_ascii_hexdigit() && !lo.is_ascii_lowercase());
        } else {
            assert!(UNRESERVED.allows(x as char));
        }
    }

    assert_eq!(pct_enc::decode(&encoded).unwrap(), data);
});
