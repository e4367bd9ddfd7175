//! Bit-level writer.
//!
//! Packs bits MSB-first into an accumulator byte and emits each completed
//! byte to a `Write` sink. A trailing partial byte is only emitted by
//! `flush`, `flush_with_ones` or `finish`.

use crate::error::{BitioError, BitioResult};
use log::{debug, trace};
use std::io::Write;

/// Trait for writing bits to a sink.
pub trait BitWrite {
    /// Write a single bit. Only 0 and 1 are accepted.
    fn write_bit(&mut self, bit: u8) -> BitioResult<()>;

    /// Write a single bit given as a flag.
    fn write_flag(&mut self, flag: bool) -> BitioResult<()> {
        self.write_bit(u8::from(flag))
    }

    /// Write the most significant `n` bits of `bytes`, MSB-first.
    ///
    /// Returns the number of bits written together with the outcome. If
    /// `bytes` holds fewer than `n` bits, every available bit is written
    /// and the outcome is `EndOfStream`. Nothing is flushed.
    fn write_bits(&mut self, bytes: &[u8], n: usize) -> (usize, BitioResult<()>) {
        for i in 0..n {
            let Some(byte) = bytes.get(i / 8) else {
                return (i, Err(BitioError::end_of_stream()));
            };
            if let Err(e) = self.write_bit((byte >> (7 - i % 8)) & 1) {
                return (i, Err(e));
            }
        }
        (n, Ok(()))
    }
}

/// Writes individual bits (MSB first) to a byte stream.
///
/// Call `flush`, `flush_with_ones` or `finish` after the last bit, or up
/// to 7 trailing bits are lost.
pub struct BitWriter<W: Write> {
    writer: W,
    bit_buffer: u8,
    bits_stored: u8,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new BitWriter over a Write sink.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            bit_buffer: 0,
            bits_stored: 0,
            bits_written: 0,
        }
    }

    /// Number of bits waiting in the accumulator (0..=7).
    pub fn pending_bits(&self) -> u8 {
        self.bits_stored
    }

    /// Total number of bits accepted so far, padding excluded.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Unwrap the sink without flushing. Pending bits are discarded.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Flush with zero padding and unwrap the sink.
    pub fn finish(mut self) -> BitioResult<W> {
        self.flush()?;
        Ok(self.writer)
    }

    /// Write a single bit.
    ///
    /// On any error the accumulator and cursor are left untouched.
    pub fn write_bit(&mut self, bit: u8) -> BitioResult<()> {
        if bit > 1 {
            return Err(BitioError::invalid_bit(bit));
        }

        let filled = self.bit_buffer | (bit << (7 - self.bits_stored));
        if self.bits_stored == 7 {
            self.emit(filled)?;
            self.bit_buffer = 0;
            self.bits_stored = 0;
        } else {
            self.bit_buffer = filled;
            self.bits_stored += 1;
        }
        self.bits_written += 1;

        Ok(())
    }

    /// Write the most significant `n` bits of `bytes`.
    pub fn write_bits(&mut self, bytes: &[u8], n: usize) -> (usize, BitioResult<()>) {
        BitWrite::write_bits(self, bytes, n)
    }

    /// Emit a pending partial byte, padding the unfilled low bits with 0.
    ///
    /// No-op when nothing is pending.
    pub fn flush(&mut self) -> BitioResult<()> {
        self.flush_padded(0x00)
    }

    /// Emit a pending partial byte, padding the unfilled low bits with 1.
    ///
    /// No-op when nothing is pending.
    pub fn flush_with_ones(&mut self) -> BitioResult<()> {
        self.flush_padded(0xFF)
    }

    fn flush_padded(&mut self, pad: u8) -> BitioResult<()> {
        if self.bits_stored == 0 {
            return Ok(());
        }

        let byte = self.bit_buffer | (pad >> self.bits_stored);
        debug!(
            "flushing {} pending bits padded with {}",
            self.bits_stored,
            pad & 1
        );
        self.emit(byte)?;
        self.bit_buffer = 0;
        self.bits_stored = 0;

        Ok(())
    }

    fn emit(&mut self, byte: u8) -> BitioResult<()> {
        self.writer.write_all(&[byte])?;
        trace!("emitted byte {:#010b}", byte);
        Ok(())
    }
}

impl<W: Write> BitWrite for BitWriter<W> {
    fn write_bit(&mut self, bit: u8) -> BitioResult<()> {
        BitWriter::write_bit(self, bit)
    }
}
