#![no_main]
use std::io::Read;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The streaming decoder must agree with the one-shot decoder on
    // everything the latter accepts.
    let mut dec = lz4block::Lz4DecoderStream::new(data, data.len() as u64);
    let mut streamed = Vec::new();
    let stream_ok = dec.read_to_end(&mut streamed).is_ok();

    let mut dst = vec![0u8; 1 << 20];
    if let Ok(n) = lz4block::decode(data, &mut dst, false) {
        assert!(stream_ok, "stream rejected a block the one-shot decoder accepted");
        assert_eq!(&streamed[..], &dst[..n]);
    }
});
