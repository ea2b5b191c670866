//! The LZSS encoder: sliding window, position tree and the driver that
//! ties them together.
//!
//! This is a close port of `LZSS_CompressData` and friends in the
//! original C source. The window and tree are instance fields of
//! [`Compressor`] rather than file-scope globals, so independent streams
//! can be compressed concurrently from separate instances — the source's
//! own globals would not allow that.

use crate::params::{
    BREAK_EVEN, END_OF_STREAM, INDEX_BITS, LENGTH_BITS, LOOKAHEAD, RAW_LOOKAHEAD, WINDOW_SIZE,
};
use crate::sink::{BitSink, ByteRead, ByteSource, VecBitSink, SliceByteSource};
use crate::tools::position_tree::PositionTree;
use crate::tools::ring_buffer::RingBuffer;
use crate::Error;

/// Thin facade over [`PositionTree::add_node`]. There is no search-only
/// path: inserting a position and finding its best match are the same
/// operation, fused to amortise the tree descent.
struct MatchEngine<'a> {
    tree: &'a mut PositionTree,
    window: &'a RingBuffer<u8>,
}

impl MatchEngine<'_> {
    fn insert(&mut self, pos: usize) -> (usize, usize) {
        self.tree.add_node(pos, self.window)
    }
}

/// Encodes an arbitrary byte stream into the bit-exact LZSS format
/// described in the crate's module docs. One instance compresses exactly
/// one stream; construct a fresh `Compressor` for each.
pub struct Compressor {
    window: RingBuffer<u8>,
    tree: PositionTree,
    win_pos: usize,
    ahead: usize,
    match_len: usize,
    match_pos: usize,
    eos_reached: bool,
}

impl Compressor {
    pub fn new() -> Self {
        Self {
            window: RingBuffer::create(0, WINDOW_SIZE),
            tree: PositionTree::new(),
            win_pos: 1,
            ahead: 0,
            match_len: 0,
            match_pos: 0,
            eos_reached: false,
        }
    }

    /// Run the full encoder driver: prime the look-ahead buffer, then
    /// alternate between deciding a record, emitting it, and advancing
    /// the window and tree, until the input is exhausted. Always ends
    /// with the end-of-stream marker.
    pub fn compress<R: ByteSource, S: BitSink>(
        &mut self,
        input: &mut R,
        output: &mut S,
    ) -> Result<(), Error> {
        while self.ahead < LOOKAHEAD && !self.eos_reached {
            match input.read_byte()? {
                ByteRead::Byte(b) => {
                    let pos = (self.win_pos + self.ahead) % WINDOW_SIZE;
                    self.window.set_abs(pos, b);
                    self.ahead += 1;
                }
                ByteRead::EndOfStream => {
                    self.eos_reached = true;
                }
            }
        }
        self.tree.init_tree(self.win_pos);
        log::debug!(
            "priming done: ahead={} eos_reached={}",
            self.ahead,
            self.eos_reached
        );

        while self.ahead > 0 {
            if self.match_len > self.ahead {
                self.match_len = self.ahead;
            }
            debug_assert!(
                self.match_len <= LOOKAHEAD,
                "match_len {} exceeds LOOKAHEAD after clamp",
                self.match_len
            );

            let repl;
            if self.match_len <= BREAK_EVEN {
                repl = 1;
                let literal = self.window.get_abs(self.win_pos);
                output.emit_bit(true)?;
                output.emit_bits(literal as u32, 8)?;
                log::trace!("literal 0x{:02x} at window position {}", literal, self.win_pos);
            } else {
                let length_field = self.match_len - (BREAK_EVEN + 1);
                debug_assert!(
                    length_field < RAW_LOOKAHEAD,
                    "length field {} overflows LENGTH_BITS",
                    length_field
                );
                output.emit_bit(false)?;
                output.emit_bits(self.match_pos as u32, INDEX_BITS as u8)?;
                output.emit_bits(length_field as u32, LENGTH_BITS as u8)?;
                repl = self.match_len;
                log::trace!(
                    "back-reference position={} length={}",
                    self.match_pos,
                    self.match_len
                );
            }

            for _ in 0..repl {
                let evict = (self.win_pos + LOOKAHEAD) % WINDOW_SIZE;
                self.tree.delete_node(evict);
                match input.read_byte()? {
                    ByteRead::Byte(b) => {
                        self.window.set_abs(evict, b);
                    }
                    ByteRead::EndOfStream => {
                        self.eos_reached = true;
                        self.ahead -= 1;
                    }
                }
                self.win_pos = (self.win_pos + 1) % WINDOW_SIZE;
                if self.ahead > 0 {
                    let (len, pos) = MatchEngine {
                        tree: &mut self.tree,
                        window: &self.window,
                    }
                    .insert(self.win_pos);
                    self.match_len = len;
                    self.match_pos = pos;
                }
            }
        }

        log::debug!("input exhausted, emitting end-of-stream marker");
        output.emit_bit(false)?;
        output.emit_bits(END_OF_STREAM as u32, INDEX_BITS as u8)?;
        Ok(())
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Compress an in-memory buffer, returning the compressed bitstream.
pub fn compress_slice(data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut compressor = Compressor::new();
    let mut input = SliceByteSource::new(data);
    let mut output = VecBitSink::new();
    compressor.compress(&mut input, &mut output)?;
    Ok(output.finish())
}
