use rand::{thread_rng, Rng};
use shrink::{Config, Decoder, Encoder, Error, Malformed, Poll};

/// "abcabcabc" compressed with a window of 2^8 and a lookahead of 2^4: three
/// literals and one overlapping reference (offset 3, length 6).
const ABC_COMPRESSED: [u8; 5] = [0x30, 0x98, 0x8c, 0x70, 0x25];

fn sample_text() -> Vec<u8> {
    let text = "Entropy encoding is typically the last stage of a compression \
        pipeline. The sliding window stage comes first, and it replaces \
        repeated strings with references to the previous occurrence.";
    text.as_bytes().repeat(20)
}

#[test]
fn test_const_stream() {
    let mut encoder = Encoder::new(8, 4).unwrap();
    assert_eq!(encoder.encode(b"abcabcabc"), ABC_COMPRESSED);

    let mut decoder = Decoder::new(8, 4).unwrap();
    assert_eq!(decoder.decode(&ABC_COMPRESSED).unwrap(), b"abcabcabc");

    // A single literal, padded with seven zero bits.
    assert_eq!(encoder.encode(b"a"), vec![0x30, 0x80]);
    assert_eq!(decoder.decode(&[0x30, 0x80]).unwrap(), b"a");
}

#[test]
fn test_dangling_reference() {
    let mut decoder = Decoder::new(8, 4).unwrap();

    // A reference before any byte was decoded.
    let res = decoder.decode(&[0x80, 0x00]);
    assert_eq!(
        res,
        Err(Error::MalformedStream(Malformed::DanglingReference {
            offset: 1,
            available: 0
        }))
    );

    // Change the offset of the reference from 3 to 10.
    let mut corrupted = ABC_COMPRESSED;
    corrupted[4] = 0x95;
    let res = decoder.decode(&corrupted);
    assert_eq!(
        res,
        Err(Error::MalformedStream(Malformed::DanglingReference {
            offset: 10,
            available: 3
        }))
    );

    // The decoder recovers after an error.
    assert_eq!(decoder.decode(&ABC_COMPRESSED).unwrap(), b"abcabcabc");
}

#[test]
fn test_truncated_stream() {
    let mut decoder = Decoder::new(8, 4).unwrap();
    let truncated = |res: shrink::Result<Vec<u8>>| {
        matches!(
            res,
            Err(Error::MalformedStream(Malformed::TruncatedToken { .. }))
        )
    };

    // Half of a literal.
    assert!(truncated(decoder.decode(&[0x30])));
    // The start of a reference.
    assert!(truncated(decoder.decode(&[0x80])));
    // A full byte of zero padding is longer than any valid padding.
    assert!(truncated(decoder.decode(&[0x00])));
    // Drop the last byte of a valid stream.
    assert!(truncated(decoder.decode(&ABC_COMPRESSED[..4])));
    // Non-zero padding bits.
    assert!(truncated(decoder.decode(&[0x30, 0x81])));
}

#[test]
fn test_never_panics_on_garbage() {
    let mut rng = thread_rng();
    for (window, lookahead) in [(4, 3), (8, 4), (15, 14)] {
        let mut decoder = Decoder::new(window, lookahead).unwrap();
        for len in 0..300 {
            let input: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let _ = decoder.decode(&input);
        }
        let _ = decoder.decode(&vec![0xff; 10_000]);
        let _ = decoder.decode(&vec![0; 10_000]);
    }
}

#[test]
fn test_small_input_buffers() {
    let input = sample_text();
    let mut encoder = Encoder::new(10, 5).unwrap();
    let compressed = encoder.encode(&input);

    for capacity in [1, 2, 3, 7, 64, 4096] {
        let mut decoder = Decoder::with_input_buffer(capacity, 10, 5).unwrap();
        assert_eq!(decoder.decode(&compressed).unwrap(), input);
    }
}

#[test]
fn test_streaming_sink_and_poll() {
    let input = sample_text();
    let mut encoder = Encoder::new(8, 4).unwrap();
    let compressed = encoder.encode(&input);

    let mut rng = thread_rng();
    let mut decoder = Decoder::with_input_buffer(16, 8, 4).unwrap();
    let mut output = Vec::new();
    let mut rest = &compressed[..];

    while !rest.is_empty() {
        // Hand over chunks that don't line up with the tokens.
        let chunk = rng.gen_range(1..=rest.len().min(40));
        let mut part = &rest[..chunk];
        rest = &rest[chunk..];

        while !part.is_empty() {
            let accepted = decoder.sink(part);
            part = &part[accepted..];
            // Drain with a small output limit.
            loop {
                let before = output.len();
                let status = decoder.poll(&mut output, 5).unwrap();
                assert!(output.len() - before <= 5);
                if status == Poll::Empty {
                    break;
                }
            }
        }
    }
    decoder.finish(&mut output).unwrap();
    assert_eq!(output, input);

    // The decoder starts a new stream after finish.
    let mut output = Vec::new();
    assert_eq!(decoder.sink(&ABC_COMPRESSED), ABC_COMPRESSED.len());
    decoder.finish(&mut output).unwrap();
    assert_eq!(output, b"abcabcabc");
}

#[test]
fn test_sink_respects_capacity() {
    let mut decoder = Decoder::with_input_buffer(3, 8, 4).unwrap();
    assert_eq!(decoder.sink(&ABC_COMPRESSED), 3);
    assert_eq!(decoder.sink(&ABC_COMPRESSED[3..]), 0);

    let mut output = Vec::new();
    assert_eq!(decoder.poll(&mut output, usize::MAX), Ok(Poll::Empty));
    assert_eq!(decoder.sink(&ABC_COMPRESSED[3..]), 2);
    decoder.finish(&mut output).unwrap();
    assert_eq!(output, b"abcabcabc");
}

#[test]
fn test_reference_split_across_polls() {
    let mut decoder = Decoder::new(8, 4).unwrap();
    let mut output = Vec::new();
    decoder.sink(&ABC_COMPRESSED);

    // Three literals, then the six byte reference is copied in two steps.
    assert_eq!(decoder.poll(&mut output, 4), Ok(Poll::More));
    assert_eq!(output, b"abca");
    assert_eq!(decoder.poll(&mut output, 4), Ok(Poll::More));
    assert_eq!(output, b"abcabcab");
    assert_eq!(decoder.poll(&mut output, 4), Ok(Poll::Empty));
    assert_eq!(output, b"abcabcabc");
    decoder.finish(&mut output).unwrap();
}

#[test]
fn test_mismatched_configs() {
    let input = sample_text();
    let configs = [(8, 4), (9, 4), (8, 5), (10, 3), (4, 3)];

    for &(w1, l1) in &configs {
        let compressed = Encoder::new(w1, l1).unwrap().encode(&input);
        for &(w2, l2) in &configs {
            if (w1, l1) == (w2, l2) {
                continue;
            }
            let res = Decoder::new(w2, l2).unwrap().decode(&compressed);
            match res {
                Ok(output) => assert_ne!(output, input),
                Err(err) => assert!(matches!(err, Error::MalformedStream(_))),
            }
        }
    }
}

#[test]
fn test_convenience_functions() {
    let cfg = Config::new(11, 4).unwrap();
    let input = sample_text();
    let compressed = shrink::encode(&input, &cfg);
    assert!(compressed.len() < input.len() / 2);
    assert_eq!(shrink::decode(&compressed, &cfg).unwrap(), input);
}
