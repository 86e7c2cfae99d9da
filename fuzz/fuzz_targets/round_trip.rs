#![no_main]

use libfuzzer_sys::fuzz_target;
use shrink::{Decoder, Encoder};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // The first two bytes select the configuration.
    let window = 4 + data[0] % 12;
    let lookahead = 3 + data[1] % (window - 3);
    let data = &data[2..];

    let mut encoder = Encoder::new(window, lookahead).unwrap();
    let compressed = encoder.encode(data);

    let mut decoder = Decoder::with_input_buffer(7, window, lookahead).unwrap();
    let decompressed = decoder.decode(&compressed).unwrap();
    assert_eq!(decompressed, data);
});
