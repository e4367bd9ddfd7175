//! bitio library for bit-granular sequential I/O over byte streams.
//!
//! `BitReader` hands out the bits of a `Read` source and `BitWriter` packs
//! bits into a `Write` sink, both most-significant-bit first within each
//! byte. A `BitWriter` output read back through a `BitReader` yields the
//! same bits, followed by the flush padding.

pub mod bit_reader;
pub mod bit_writer;
pub mod bits;
pub mod error;
pub mod process;

pub use bit_reader::*;
pub use bit_writer::*;
pub use bits::*;
pub use error::*;
