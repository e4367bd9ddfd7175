use crate::bit_reader::BitReader;
use crate::bit_writer::BitWriter;
use crate::bits::Bits;
use crate::error::BitioResult;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Read every bit of `reader`, stopping cleanly at end of stream.
fn read_to_end(reader: &mut BitReader<impl std::io::Read>, limit: usize) -> BitioResult<Bits> {
    let (bits, outcome) = reader.read_bits(limit);
    match outcome {
        Err(e) if !e.is_end_of_stream() => Err(e),
        _ => Ok(bits),
    }
}

/// Bits as `0`/`1` text, one space between bytes.
fn grouped(bits: &Bits) -> String {
    let text = bits.to_string();
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for (i, c) in text.chars().enumerate() {
        if i > 0 && i % 8 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

pub fn bits_dump(input: &Path, limit: Option<usize>) -> BitioResult<String> {
    let mut reader = BitReader::new(BufReader::new(File::open(input)?));
    let bits = read_to_end(&mut reader, limit.unwrap_or(usize::MAX))?;
    Ok(grouped(&bits))
}

pub fn bits_pack(input: &Path, output: &Option<PathBuf>, ones: bool) -> BitioResult<()> {
    let text = fs::read_to_string(input)?;
    let bits: Bits = text.parse()?;

    let out_path = match output {
        Some(p) => p.clone(),
        None => input.with_extension("bin"),
    };

    let mut writer = BitWriter::new(BufWriter::new(File::create(&out_path)?));
    let (count, outcome) = writer.write_bits(bits.as_bytes(), bits.len());
    outcome?;
    if ones {
        writer.flush_with_ones()?;
    } else {
        writer.flush()?;
    }
    writer.into_inner().flush()?;

    println!(
        "Packed {} bits ({} bytes) to {:?}",
        count,
        count.div_ceil(8),
        out_path
    );
    Ok(())
}

pub fn bits_unpack(input: &Path, output: &Option<PathBuf>) -> BitioResult<()> {
    let mut reader = BitReader::new(BufReader::new(File::open(input)?));
    let bits = read_to_end(&mut reader, usize::MAX)?;

    let out_path = match output {
        Some(p) => p.clone(),
        None => input.with_extension("bits"),
    };

    fs::write(&out_path, format!("{}\n", grouped(&bits)))?;
    println!("Unpacked {} bits to {:?}", bits.len(), out_path);
    Ok(())
}
