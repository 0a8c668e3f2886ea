// e2e/support/block_shape.rs: block walker shared by the encoder suites
//
// Decodes only the sequence headers of a block so tests can check the
// format rules every encoder must respect, independent of the decoder.

use lz4block::block::LZ4_DISTANCE_MAX;

/// Walk the sequences of a block and return `(literal_len, offset, match_len)`
/// triples; the final literal-only sequence has offset 0 and match_len 0.
pub fn sequences(block: &[u8]) -> Vec<(usize, usize, usize)> {
    let mut seqs = Vec::new();
    let mut ip = 0;
    loop {
        let token = block[ip];
        ip += 1;
        let mut lit = (token >> 4) as usize;
        if lit == 15 {
            loop {
                let b = block[ip];
                ip += 1;
                lit += b as usize;
                if b != 255 {
                    break;
                }
            }
        }
        ip += lit;
        if ip == block.len() {
            seqs.push((lit, 0, 0));
            return seqs;
        }
        let off = u16::from_le_bytes([block[ip], block[ip + 1]]) as usize;
        ip += 2;
        let mut ml = (token & 0x0F) as usize;
        if ml == 15 {
            loop {
                let b = block[ip];
                ip += 1;
                ml += b as usize;
                if b != 255 {
                    break;
                }
            }
        }
        seqs.push((lit, off, ml + 4));
    }
}

/// Assert that `packed` is a well-formed block for `src`: offsets inside
/// `1..=LZ4_DISTANCE_MAX` and never reaching before the start, matches of at
/// least 4 bytes, and the last five bytes left to the final literal run.
pub fn assert_block_shape(src: &[u8], packed: &[u8]) {
    let seqs = sequences(packed);
    let (last_lit, last_off, last_ml) = *seqs.last().unwrap();
    assert_eq!((last_off, last_ml), (0, 0), "block must end with a literal-only sequence");
    if seqs.len() > 1 {
        assert!(last_lit >= 5, "last literal run is {last_lit} bytes");
    }

    let mut pos = 0;
    for (i, &(lit, off, ml)) in seqs[..seqs.len() - 1].iter().enumerate() {
        pos += lit;
        assert!(
            (1..=LZ4_DISTANCE_MAX).contains(&off),
            "sequence {i}: offset {off} out of range"
        );
        assert!(off <= pos, "sequence {i}: offset {off} reaches before the start ({pos})");
        assert!(ml >= 4);
        pos += ml;
        assert!(src.len() - pos >= 5, "sequence {i}: match ends within the last five bytes");
        assert_eq!(&src[pos - ml..pos], &src[pos - ml - off..pos - off], "sequence {i}");
    }
    assert_eq!(pos + last_lit, src.len());
}

/// `len` bytes of noise with the first 1 KiB copied every 2,000 bytes from
/// offset 66,000 on: the first copy lies beyond the match window, each later
/// one within it of the previous copy.
pub fn far_repeats(len: usize, seed: u64) -> Vec<u8> {
    const CHUNK: usize = 1_024;
    let mut s = seed | 1;
    let mut src: Vec<u8> = (0..len)
        .map(|_| {
            s ^= s << 13;
            s ^= s >> 7;
            s ^= s << 17;
            (s >> 24) as u8
        })
        .collect();
    let mut at = 66_000;
    while at + CHUNK <= len {
        src.copy_within(0..CHUNK, at);
        at += 2_000;
    }
    src
}
