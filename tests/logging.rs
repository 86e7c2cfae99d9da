use log::{Level, LevelFilter, Log, Metadata, Record};
use shrink::{Decoder, Encoder};
use std::sync::Mutex;

/// Records every message so the test can inspect them.
struct Capture {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture {
    records: Mutex::new(Vec::new()),
};

#[test]
fn test_codec_logging() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut encoder = Encoder::new(8, 4).unwrap();
    let mut decoder = Decoder::new(8, 4).unwrap();
    let compressed = encoder.encode(b"abcabcabc");
    assert_eq!(decoder.decode(&compressed).unwrap(), b"abcabcabc");
    assert!(decoder.decode(&[0x80, 0x00]).is_err());

    let records = LOGGER.records.lock().unwrap();
    let count = |level: Level, text: &str| {
        records
            .iter()
            .filter(|(l, msg)| *l == level && msg.contains(text))
            .count()
    };
    // Once from the encoder and once from the decoder.
    assert_eq!(count(Level::Trace, "Reference: offset 3, length 6"), 2);
    assert_eq!(count(Level::Debug, "Encoded 9 bytes"), 1);
    assert_eq!(count(Level::Debug, "Decoded 5 bytes"), 1);
    assert_eq!(count(Level::Debug, "Decoding failed"), 1);
}
