//! Compile-time parameters of the LZSS bitstream format.
//!
//! These are fixed at build time by design: changing any of them changes
//! the bitstream format and breaks compatibility with any already-deployed
//! decoder (see `LZSS_INDEX_BIT_COUNT`/`LZSS_LENGTH_BIT_COUNT` in the
//! original C source). There is deliberately no runtime `Options` struct
//! to construct here.

/// Bits used to encode a window position in a back-reference record.
pub const INDEX_BITS: u32 = 10;
/// Bits used to encode a match length field.
pub const LENGTH_BITS: u32 = 4;
/// Size of the sliding window, `2^INDEX_BITS`.
pub const WINDOW_SIZE: usize = 1 << INDEX_BITS;
/// Size of the raw look-ahead buffer, `2^LENGTH_BITS`.
pub const RAW_LOOKAHEAD: usize = 1 << LENGTH_BITS;
/// Minimum profitable match length minus one.
pub const BREAK_EVEN: usize = (1 + INDEX_BITS as usize + LENGTH_BITS as usize) / 9;
/// Maximum match length the tree will ever report.
pub const LOOKAHEAD: usize = RAW_LOOKAHEAD + BREAK_EVEN;
/// Reserved position value used as the in-band stream terminator.
pub const END_OF_STREAM: usize = 0;

// Position 0 must never be a real tree node (the driver starts writing at
// position 1), or it would collide with END_OF_STREAM. This also keeps the
// back-reference length field's range, [BREAK_EVEN+1, LOOKAHEAD], inside
// what LENGTH_BITS can represent.
const _: () = assert!(WINDOW_SIZE > LOOKAHEAD);
const _: () = assert!(LOOKAHEAD - (BREAK_EVEN + 1) < RAW_LOOKAHEAD);
