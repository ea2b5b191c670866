//! # LZSS Stream Compressor
//!
//! A single-pass LZSS encoder built around a sliding dictionary and an
//! intrusive binary search tree indexed by window position. It is a
//! close port of a MISRA-flavoured embedded C reference (a tree-indexed
//! LZSS compressor meant for firmware-update pipelines where the paired
//! decoder has to stay tiny), reshaped into instance state so independent
//! streams can be compressed concurrently.
//!
//! What is *not* here, by design: the paired decoder, any file framing or
//! checksum, entropy coding on top of the LZSS stage, and a CLI beyond a
//! thin one-shot wrapper. Those are either genuinely out of scope or
//! somebody else's problem (the decoder is assumed to already exist).
//!
//! ## Example
//!
//! ```
//! use lzss_stream::compress_slice;
//! let compressed = compress_slice(b"abababababababababab").expect("compression failed");
//! eprintln!("compressed into {} bytes", compressed.len());
//! ```

mod lzss;
mod params;
mod sink;
mod tools;

pub use lzss::{compress_slice, Compressor};
pub use params::{
    BREAK_EVEN, END_OF_STREAM, INDEX_BITS, LENGTH_BITS, LOOKAHEAD, RAW_LOOKAHEAD, WINDOW_SIZE,
};
pub use sink::{
    BitSink, ByteRead, ByteSource, ReadByteSource, SliceByteSource, VecBitSink, WriteBitSink,
};

/// Errors the compressor can report. Tree and driver invariant
/// violations are programming bugs, not recoverable conditions — those
/// are asserted on, not represented here.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
