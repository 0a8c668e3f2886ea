//! LZ4 block constants, byte readers, copy primitives, and hash-table types.
//!
//! Everything here works on bounds-checked slices with explicit positions:
//!   - Format constants (`MINMATCH`, `LASTLITERALS`, `MFLIMIT`, …)
//!   - Little-endian readers/writers
//!   - Copy primitives: [`bulk_copy`], [`wild_copy`], [`secure_copy`], [`match_copy`]
//!   - `INC32TABLE` / `DEC64TABLE` overlap-correction tables
//!   - [`nb_common_bytes`] (de Bruijn) and [`count`] (match-length measurement)
//!   - Greedy-encoder hash tables ([`CompressContext`])

// ─────────────────────────────────────────────────────────────────────────────
// Format constants
// ─────────────────────────────────────────────────────────────────────────────

/// Minimum match length encoded in an LZ4 block.
pub const MINMATCH: usize = 4;

/// Wildcard-copy granularity (helpers may write up to this many bytes past the
/// logical end of the destination when the buffer has room).
pub const WILDCOPYLENGTH: usize = 8;

/// Last N bytes of a block are always literals.
pub const LASTLITERALS: usize = 5;

/// Minimum bytes needed at the input tail to attempt a new match.
pub const MFLIMIT: usize = 12;

/// Minimum input length that may produce any match at all.
pub const LZ4_MIN_LENGTH: usize = MFLIMIT + 1;

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

/// Maximum back-reference distance (offsets are stored on 16 bits).
pub const LZ4_DISTANCE_MAX: usize = 65_535;

/// Largest input a single block may hold.
pub const LZ4_MAX_INPUT_SIZE: usize = 0x7E00_0000;

pub const ML_BITS: usize = 4;
pub const ML_MASK: usize = (1 << ML_BITS) - 1;
pub const RUN_BITS: usize = 8 - ML_BITS;
pub const RUN_MASK: usize = (1 << RUN_BITS) - 1;

// ─────────────────────────────────────────────────────────────────────────────
// Hash-table sizing (16 KiB of table memory)
// ─────────────────────────────────────────────────────────────────────────────

/// Log₂ of hash-table memory in bytes.
pub const LZ4_MEMORY_USAGE: u32 = 14;
/// Bits kept from each hash value for the 32-bit table.
pub const LZ4_HASHLOG: u32 = LZ4_MEMORY_USAGE - 2; // 12
/// Number of u32 entries in the large-input table.
pub const LZ4_HASH_SIZE_U32: usize = 1 << LZ4_HASHLOG; // 4096
/// Number of u16 entries in the small-input table.
pub const LZ4_HASH_SIZE_U16: usize = 1 << (LZ4_HASHLOG + 1); // 8192

/// Inputs below this size use 16-bit (window-relative) table entries.
pub const LZ4_64KLIMIT: usize = (64 * KB) + (MFLIMIT - 1);

/// Higher → faster on incompressible data at the cost of compression ratio.
pub const LZ4_SKIP_TRIGGER: u32 = 6;

// ─────────────────────────────────────────────────────────────────────────────
// Directives
// ─────────────────────────────────────────────────────────────────────────────

/// Whether the encoder must check capacity before each write.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LimitedOutputDirective {
    /// Destination is at least `maximum_output_length(src.len())` bytes.
    NotLimited,
    /// Stop (and report "does not fit") as soon as the destination is full.
    LimitedOutput,
}

/// Layout of the greedy encoder's hash table.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TableType {
    /// 4096 absolute 32-bit positions, for inputs of `LZ4_64KLIMIT` bytes or more.
    ByU32,
    /// 8192 16-bit positions, for inputs below `LZ4_64KLIMIT`.
    ByU16,
}

impl TableType {
    #[inline]
    pub fn for_input_len(len: usize) -> Self {
        if len < LZ4_64KLIMIT {
            TableType::ByU16
        } else {
            TableType::ByU32
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Greedy-encoder context
// ─────────────────────────────────────────────────────────────────────────────

/// Hash tables for the greedy block encoder.
///
/// Owned by the caller and reset at the start of every encode call, so one
/// context can serve any number of sequential jobs.  Concurrent jobs need one
/// context each.
pub struct CompressContext {
    table_u32: Box<[u32]>,
    table_u16: Box<[u16]>,
}

impl CompressContext {
    pub fn new() -> Self {
        Self {
            table_u32: vec![0u32; LZ4_HASH_SIZE_U32].into_boxed_slice(),
            table_u16: vec![0u16; LZ4_HASH_SIZE_U16].into_boxed_slice(),
        }
    }

    /// Zero the table used by `table_type`.
    pub fn reset(&mut self, table_type: TableType) {
        match table_type {
            TableType::ByU32 => self.table_u32.fill(0),
            TableType::ByU16 => self.table_u16.fill(0),
        }
    }

    #[inline(always)]
    pub(crate) fn put_index(&mut self, idx: usize, h: usize, table_type: TableType) {
        match table_type {
            TableType::ByU32 => self.table_u32[h] = idx as u32,
            TableType::ByU16 => {
                debug_assert!(idx < 65536, "put_index: idx overflows u16");
                self.table_u16[h] = idx as u16;
            }
        }
    }

    #[inline(always)]
    pub(crate) fn get_index(&self, h: usize, table_type: TableType) -> usize {
        match table_type {
            TableType::ByU32 => self.table_u32[h] as usize,
            TableType::ByU16 => self.table_u16[h] as usize,
        }
    }
}

impl Default for CompressContext {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Byte readers / writers
//
// All multi-byte fields are little-endian on the wire, and match measurement
// reads words as little-endian so results do not depend on the host.
// ─────────────────────────────────────────────────────────────────────────────

#[inline(always)]
pub fn read_le16(buf: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([buf[pos], buf[pos + 1]])
}

#[inline(always)]
pub fn read32(buf: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]])
}

#[inline(always)]
pub fn read64(buf: &[u8], pos: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&buf[pos..pos + 8]);
    u64::from_le_bytes(word)
}

#[inline(always)]
pub fn write_le16(buf: &mut [u8], pos: usize, value: u16) {
    buf[pos..pos + 2].copy_from_slice(&value.to_le_bytes());
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlap-correction tables
// ─────────────────────────────────────────────────────────────────────────────

/// Advance the match cursor after the first 4 bytes of a short-offset copy.
pub static INC32TABLE: [usize; 8] = [0, 1, 2, 1, 0, 4, 4, 4];

/// Back up the match cursor after the second 4 bytes of a short-offset copy.
pub static DEC64TABLE: [isize; 8] = [0, 0, 0, -1, -4, 1, 2, 3];

// ─────────────────────────────────────────────────────────────────────────────
// Copy primitives
// ─────────────────────────────────────────────────────────────────────────────

/// Copy `len` non-overlapping bytes from `src[src_pos..]` to `dst[dst_pos..]`.
///
/// Short runs go through an unrolled 8/4/1 ladder; 16 bytes and more use a
/// single slice copy.
#[inline]
pub fn bulk_copy(src: &[u8], src_pos: usize, dst: &mut [u8], dst_pos: usize, len: usize) {
    let s = &src[src_pos..src_pos + len];
    let d = &mut dst[dst_pos..dst_pos + len];
    if len >= 16 {
        d.copy_from_slice(s);
        return;
    }
    let mut i = 0;
    while i + 8 <= len {
        d[i..i + 8].copy_from_slice(&s[i..i + 8]);
        i += 8;
    }
    if i + 4 <= len {
        d[i..i + 4].copy_from_slice(&s[i..i + 4]);
        i += 4;
    }
    while i < len {
        d[i] = s[i];
        i += 1;
    }
}

/// Copy `dst_end - dst_pos` bytes in whole 8-byte strides.
///
/// May write up to 7 bytes past `dst_end` when both buffers have room for the
/// rounded-up span; otherwise copies exactly.  Returns the logical advance.
#[inline]
pub fn wild_copy(src: &[u8], src_pos: usize, dst: &mut [u8], dst_pos: usize, dst_end: usize) -> usize {
    let len = dst_end - dst_pos;
    let span = (len + WILDCOPYLENGTH - 1) & !(WILDCOPYLENGTH - 1);
    if dst_pos + span <= dst.len() && src_pos + span <= src.len() {
        let mut s = src_pos;
        let mut d = dst_pos;
        while d < dst_end {
            dst[d..d + WILDCOPYLENGTH].copy_from_slice(&src[s..s + WILDCOPYLENGTH]);
            d += WILDCOPYLENGTH;
            s += WILDCOPYLENGTH;
        }
    } else {
        bulk_copy(src, src_pos, dst, dst_pos, len);
    }
    len
}

/// Copy `buf[src..]` to `buf[dst..dst_end]` where the ranges may overlap
/// (`src < dst`), replicating the pattern of period `dst - src`.
///
/// Distances of at least `WILDCOPYLENGTH` move whole distance-sized spans;
/// shorter ones go byte by byte.  Never writes past `dst_end`.
#[inline]
pub fn secure_copy(buf: &mut [u8], src: usize, dst: usize, dst_end: usize) -> usize {
    debug_assert!(src < dst);
    let distance = dst - src;
    let mut s = src;
    let mut d = dst;
    if distance >= WILDCOPYLENGTH {
        while d < dst_end {
            let n = distance.min(dst_end - d);
            buf.copy_within(s..s + n, d);
            s += n;
            d += n;
        }
    } else {
        while d < dst_end {
            buf[d] = buf[s];
            d += 1;
            s += 1;
        }
    }
    dst_end - dst
}

/// Expand the back-reference `(offset, match_end - op)` in place.
///
/// Writes an 8-byte head (fixing up offsets below 8 with
/// `INC32TABLE`/`DEC64TABLE` so the remaining distance is at least 8), then
/// 8-byte strides when the buffer has a `WILDCOPYLENGTH` margin past
/// `match_end`, or an exact [`secure_copy`] otherwise.  May write up to 7
/// bytes past `match_end` but never past `buf.len()`.
///
/// Requires `1 <= offset <= op` and `match_end <= buf.len()`.
#[inline]
pub fn match_copy(buf: &mut [u8], mut op: usize, offset: usize, match_end: usize) {
    debug_assert!(offset >= 1 && offset <= op);
    let mut m = op - offset;
    if op + WILDCOPYLENGTH > buf.len() {
        secure_copy(buf, m, op, match_end);
        return;
    }

    if offset < 8 {
        buf[op] = buf[m];
        buf[op + 1] = buf[m + 1];
        buf[op + 2] = buf[m + 2];
        buf[op + 3] = buf[m + 3];
        m += INC32TABLE[offset];
        buf.copy_within(m..m + 4, op + 4);
        m = m.wrapping_sub(DEC64TABLE[offset] as usize);
    } else {
        buf.copy_within(m..m + 8, op);
        m += 8;
    }
    op += WILDCOPYLENGTH;
    if op >= match_end {
        return;
    }

    // op - m >= 8 from here on.
    if match_end + WILDCOPYLENGTH <= buf.len() {
        while op < match_end {
            buf.copy_within(m..m + WILDCOPYLENGTH, op);
            op += WILDCOPYLENGTH;
            m += WILDCOPYLENGTH;
        }
    } else {
        secure_copy(buf, m, op, match_end);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Common-byte counting
// ─────────────────────────────────────────────────────────────────────────────

/// Byte position of the lowest set bit, indexed by the de Bruijn product.
static DEBRUIJN_BYTE_POS_64: [u8; 64] = [
    0, 0, 0, 0, 0, 1, 1, 2, 0, 3, 1, 3, 1, 4, 2, 7, 0, 2, 3, 6, 1, 5, 3, 5, 1, 3, 4, 4, 2, 5, 6, 7,
    7, 0, 1, 2, 3, 3, 4, 6, 2, 6, 5, 5, 3, 4, 5, 6, 7, 1, 2, 4, 6, 4, 4, 5, 7, 2, 6, 5, 7, 6, 7, 7,
];

const DEBRUIJN_MUL_64: u64 = 0x0218_A392_CDAB_BD3F;

/// Number of equal low-order bytes given the XOR of two little-endian words.
///
/// `diff` **must** be non-zero.
#[inline(always)]
pub fn nb_common_bytes(diff: u64) -> usize {
    debug_assert!(diff != 0);
    let lowest = diff & diff.wrapping_neg();
    DEBRUIJN_BYTE_POS_64[(lowest.wrapping_mul(DEBRUIJN_MUL_64) >> 58) as usize] as usize
}

/// Count how many bytes match between `buf[ip..]` and `buf[m..]`, stopping at
/// `limit`.
///
/// Requires `m < ip` and `limit <= buf.len()`.
#[inline]
pub fn count(buf: &[u8], mut ip: usize, mut m: usize, limit: usize) -> usize {
    let start = ip;

    while ip + 8 <= limit {
        let diff = read64(buf, m) ^ read64(buf, ip);
        if diff != 0 {
            return ip + nb_common_bytes(diff) - start;
        }
        ip += 8;
        m += 8;
    }

    if ip + 4 <= limit && read32(buf, m) == read32(buf, ip) {
        ip += 4;
        m += 4;
    }
    if ip + 2 <= limit && read_le16(buf, m) == read_le16(buf, ip) {
        ip += 2;
        m += 2;
    }
    if ip < limit && buf[m] == buf[ip] {
        ip += 1;
    }
    ip - start
}

// ─────────────────────────────────────────────────────────────────────────────
// Hashing
// ─────────────────────────────────────────────────────────────────────────────

/// 4-byte Knuth-multiplicative hash.
///
/// `ByU16` keeps `LZ4_HASHLOG + 1` bits (8192 slots), `ByU32` keeps
/// `LZ4_HASHLOG` bits (4096 slots).
#[inline(always)]
pub fn hash4(sequence: u32, table_type: TableType) -> usize {
    let hash_log = match table_type {
        TableType::ByU16 => LZ4_HASHLOG + 1,
        TableType::ByU32 => LZ4_HASHLOG,
    };
    (sequence.wrapping_mul(2_654_435_761u32) >> (32 - hash_log)) as usize
}

/// Hash of the 4 bytes at `buf[pos..pos + 4]`.
#[inline(always)]
pub fn hash_position(buf: &[u8], pos: usize, table_type: TableType) -> usize {
    hash4(read32(buf, pos), table_type)
}
