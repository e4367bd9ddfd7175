//! Bit-level reader.
//!
//! Pulls bytes from a `Read` source one at a time and hands them out
//! MSB-first, one bit per call.

use crate::bits::Bits;
use crate::error::{BitioError, BitioResult};
use log::{debug, trace};
use std::io::{ErrorKind, Read};

/// Trait for reading bits from a source.
pub trait BitRead {
    /// Read a single bit, returned as 0 or 1.
    fn read_bit(&mut self) -> BitioResult<u8>;

    /// Read a single bit as a flag.
    fn read_flag(&mut self) -> BitioResult<bool> {
        Ok(self.read_bit()? == 1)
    }

    /// Read up to `n` bits, packed MSB-first.
    ///
    /// Stops at the first failed `read_bit`. The bits read before the
    /// failure are returned alongside the error; `Bits::len` is the count.
    fn read_bits(&mut self, n: usize) -> (Bits, BitioResult<()>) {
        let mut bits = Bits::with_capacity(n.min(1 << 16));
        while bits.len() < n {
            match self.read_bit() {
                Ok(bit) => bits.push(bit == 1),
                Err(e) => return (bits, Err(e)),
            }
        }
        (bits, Ok(()))
    }
}

/// Reads individual bits (MSB first) from a byte stream.
///
/// Once the source reports end of stream the reader stays exhausted and
/// never polls the source again.
pub struct BitReader<R: Read> {
    reader: R,
    current_byte: u8,
    // Index from the MSB of the next bit; 0 means a fresh byte is due.
    bit_pos: u8,
    bits_read: u64,
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    /// Create a new BitReader from a Read source.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current_byte: 0,
            bit_pos: 0,
            bits_read: 0,
            exhausted: false,
        }
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Whether the source has reported end of stream.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Unwrap the source. Unread bits of the current byte are dropped.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> BitioResult<u8> {
        if self.exhausted {
            return Err(BitioError::end_of_stream());
        }

        if self.bit_pos == 0 {
            self.current_byte = self.fetch_byte()?;
        }

        let bit = (self.current_byte >> (7 - self.bit_pos)) & 1;
        self.bit_pos = (self.bit_pos + 1) % 8;
        self.bits_read += 1;

        Ok(bit)
    }

    /// Read up to `n` bits, packed MSB-first.
    pub fn read_bits(&mut self, n: usize) -> (Bits, BitioResult<()>) {
        BitRead::read_bits(self, n)
    }

    fn fetch_byte(&mut self) -> BitioResult<u8> {
        let mut buf = [0u8; 1];
        match self.reader.read_exact(&mut buf) {
            Ok(()) => {
                trace!("fetched byte {:#010b}", buf[0]);
                Ok(buf[0])
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                debug!("bit source exhausted after {} bits", self.bits_read);
                self.exhausted = true;
                Err(BitioError::end_of_stream())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<R: Read> BitRead for BitReader<R> {
    fn read_bit(&mut self) -> BitioResult<u8> {
        BitReader::read_bit(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    /// Yields its bytes, then fails with a non-EOF error on every call.
    struct FailingSource {
        data: Cursor<Vec<u8>>,
        polls_after_end: usize,
    }

    impl Read for FailingSource {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.data.read(buf)?;
            if n == 0 {
                self.polls_after_end += 1;
                return Err(io::Error::new(ErrorKind::ConnectionReset, "source failed"));
            }
            Ok(n)
        }
    }

    /// Counts how often it is polled; always empty.
    struct CountingEmpty {
        polls: usize,
    }

    impl Read for CountingEmpty {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            self.polls += 1;
            Ok(0)
        }
    }

    fn read_all_bits(data: &[u8]) -> Vec<u8> {
        let mut reader = BitReader::new(Cursor::new(data.to_vec()));
        (0..data.len() * 8).map(|_| reader.read_bit().unwrap()).collect()
    }

    #[test]
    fn test_read_bit_msb_first() {
        let cases: Vec<(Vec<u8>, Vec<u8>)> = vec![
            (vec![0b0000_0000], vec![0, 0, 0, 0, 0, 0, 0, 0]),
            (vec![0b1010_1010], vec![1, 0, 1, 0, 1, 0, 1, 0]),
            (
                vec![0b1010_1010, 0b1010_1010],
                vec![1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
            ),
            (
                vec![0b1111_1111, 0b0000_0000, 0b1001_1001],
                vec![
                    1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0, 1,
                ],
            ),
            (vec![], vec![]),
        ];

        for (idx, (input, expected)) in cases.into_iter().enumerate() {
            let mut reader = BitReader::new(Cursor::new(input));
            for (i, want) in expected.iter().enumerate() {
                let bit = reader.read_bit().unwrap();
                assert_eq!(bit, *want, "[{idx}] bit {i}");
            }
            let err = reader.read_bit().unwrap_err();
            assert!(err.is_end_of_stream(), "[{idx}] expected end of stream");
        }
    }

    #[test]
    fn test_empty_source_is_end_of_stream() {
        let mut reader = BitReader::new(io::empty());
        assert!(reader.read_bit().unwrap_err().is_end_of_stream());
        assert!(reader.is_exhausted());
        assert_eq!(reader.bits_read(), 0);
    }

    #[test]
    fn test_exhaustion_is_permanent() {
        let mut reader = BitReader::new(CountingEmpty { polls: 0 });
        for _ in 0..5 {
            assert!(reader.read_bit().unwrap_err().is_end_of_stream());
        }
        assert_eq!(reader.get_ref().polls, 1);
    }

    #[test]
    fn test_exhaustion_mid_stream_stays_exhausted() {
        let mut reader = BitReader::new(Cursor::new(vec![0xFF]));
        for _ in 0..8 {
            assert_eq!(reader.read_bit().unwrap(), 1);
        }
        for _ in 0..10 {
            assert!(reader.read_bit().unwrap_err().is_end_of_stream());
        }
        assert_eq!(reader.bits_read(), 8);
    }

    #[test]
    fn test_io_error_propagated() {
        let mut reader = BitReader::new(FailingSource {
            data: Cursor::new(vec![0x80]),
            polls_after_end: 0,
        });
        assert_eq!(reader.read_bit().unwrap(), 1);
        for _ in 0..7 {
            assert_eq!(reader.read_bit().unwrap(), 0);
        }

        match reader.read_bit() {
            Err(BitioError::Io(e)) => assert_eq!(e.kind(), ErrorKind::ConnectionReset),
            other => panic!("unexpected result: {other:?}"),
        }
        // Not an end of stream, so the next call polls the source again.
        assert!(!reader.is_exhausted());
        assert!(matches!(reader.read_bit(), Err(BitioError::Io(_))));
        assert_eq!(reader.get_ref().polls_after_end, 2);
    }

    #[test]
    fn test_repacking_reproduces_input() {
        let data = [0x00, 0xFF, 0x92, 0x55, 0x01, 0x80, 0xA5];
        let repacked: Bits = read_all_bits(&data).into_iter().map(|b| b == 1).collect();
        assert_eq!(repacked.as_bytes(), &data);
    }

    #[test]
    fn test_read_bits() {
        let cases: Vec<(Vec<u8>, usize, Vec<u8>, usize, bool)> = vec![
            (vec![0b0000_0000], 0, vec![], 0, false),
            (vec![], 1, vec![], 0, true),
            (vec![0b1001_0010], 8, vec![0b1001_0010], 8, false),
            (vec![0b1001_0010], 4, vec![0b1001_0000], 4, false),
            (
                vec![0b1001_0010, 0b0101_0101],
                12,
                vec![0b1001_0010, 0b0101_0000],
                12,
                false,
            ),
            (
                vec![0b1001_0010, 0b0101_0101],
                16,
                vec![0b1001_0010, 0b0101_0101],
                16,
                false,
            ),
            (
                vec![0b1001_0010, 0b0101_0101],
                20,
                vec![0b1001_0010, 0b0101_0101],
                16,
                true,
            ),
        ];

        for (idx, (input, n, bytes, len, eos)) in cases.into_iter().enumerate() {
            let mut reader = BitReader::new(Cursor::new(input));
            let (bits, outcome) = reader.read_bits(n);
            assert_eq!(bits.as_bytes(), bytes.as_slice(), "[{idx}] bytes");
            assert_eq!(bits.len(), len, "[{idx}] count");
            match outcome {
                Ok(()) => assert!(!eos, "[{idx}] expected end of stream"),
                Err(e) => assert!(eos && e.is_end_of_stream(), "[{idx}] unexpected {e:?}"),
            }
        }
    }

    #[test]
    fn test_read_zero_bits_on_exhausted_source() {
        let mut reader = BitReader::new(io::empty());
        assert!(reader.read_bit().is_err());
        let (bits, outcome) = reader.read_bits(0);
        assert!(bits.is_empty());
        assert!(bits.as_bytes().is_empty());
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_partial_read_keeps_trailing_bits_zero_padded() {
        let mut reader = BitReader::new(Cursor::new(vec![0xFF]));
        reader.read_bits(3).1.unwrap();
        let (bits, outcome) = reader.read_bits(10);
        assert!(outcome.unwrap_err().is_end_of_stream());
        assert_eq!(bits.len(), 5);
        assert_eq!(bits.as_bytes(), &[0b1111_1000]);
    }

    #[test]
    fn test_read_flag_and_bits_read() {
        let mut reader = BitReader::new(Cursor::new(vec![0b0100_0000, 0xFF]));
        assert!(!reader.read_flag().unwrap());
        assert!(reader.read_flag().unwrap());
        assert_eq!(reader.bits_read(), 2);
        reader.read_bits(7).1.unwrap();
        assert_eq!(reader.bits_read(), 9);
    }

    #[test]
    fn test_into_inner_returns_source() {
        let mut reader = BitReader::new(Cursor::new(vec![0xAA, 0xBB]));
        reader.read_bit().unwrap();
        let source = reader.into_inner();
        assert_eq!(source.position(), 1);
    }
}
