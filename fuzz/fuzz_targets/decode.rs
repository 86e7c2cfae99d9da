#![no_main]

use libfuzzer_sys::fuzz_target;
use shrink::Decoder;

fuzz_target!(|data: &[u8]| {
    for (window, lookahead) in [(4, 3), (8, 4), (15, 14)] {
        let mut decoder = Decoder::new(window, lookahead).unwrap();
        let _ = decoder.decode(data);
    }
});
