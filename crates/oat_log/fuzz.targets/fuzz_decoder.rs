#![no_main]
use libfuzzer_sys::fuzz_target;
use oat_log::decoder::TraceDecoder;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode or fail, never panic
    let mut consumed = 0usize;
    for item in TraceDecoder::new(data) {
        match item {
            Ok(event) => {
                assert!(event.offset + event.payload().len() <= data.len());
                consumed = event.offset + event.payload().len();
            }
            Err(_) => return,
        }
    }
    assert_eq!(consumed, data.len());
});
