//! Just enough RIFF traversal to find the camera's `JUNK` chunk.
//!
//! The WG-1 always writes its auxiliary block before the movie data, so once
//! we hit `LIST movi`, we know there isn't one.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt as _};

use crate::error::ExtractError;

pub const RIFF: [u8; 4] = *b"RIFF";
pub const AVI: [u8; 4] = *b"AVI ";
pub const JUNK: [u8; 4] = *b"JUNK";
pub const LIST: [u8; 4] = *b"LIST";
pub const MOVI: [u8; 4] = *b"movi";

/// A chunk's 8-byte header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ChunkHeader {
    tag: [u8; 4],
    size: u32,
}

impl ChunkHeader {
    fn read<R: Read>(reader: &mut R) -> Result<Self, ExtractError> {
        let tag = read_fourcc(reader)?;
        let size = reader.read_u32::<LittleEndian>()?;
        Ok(Self { tag, size })
    }
}

/// Walks the chunks of a RIFF/AVI container, returning the payload of the
/// first `JUNK` chunk.
///
/// Returns `Ok(None)` when movie data starts before any `JUNK` chunk. A
/// wrong header or a short read is an error.
///
/// Note: odd-sized chunks are skipped by their declared size alone. RIFF's
/// trailing pad byte is not accounted for.
#[tracing::instrument(skip(reader))]
pub fn find_junk_chunk<R: Read + Seek>(
    reader: &mut R,
    max_junk_len: u32,
) -> Result<Option<Vec<u8>>, ExtractError> {
    // RIFF header: tag, size, form type
    let riff = read_fourcc(reader)?;
    let _riff_size = reader.read_u32::<LittleEndian>()?;
    let form = read_fourcc(reader)?;

    if riff != RIFF {
        tracing::debug!("not a riff file. tag: {:?}", fourcc_str(&riff));
        return Err(ExtractError::NotRiff(fourcc_str(&riff)));
    }
    if form != AVI {
        tracing::debug!("riff file isn't an avi. form type: {:?}", fourcc_str(&form));
        return Err(ExtractError::NotAvi(fourcc_str(&form)));
    }

    loop {
        let header = ChunkHeader::read(reader)
            .inspect_err(|e| tracing::warn!("Failed to read chunk header. err: {e}"))?;
        tracing::trace!(
            "chunk `{}` with size {}",
            fourcc_str(&header.tag),
            header.size
        );

        match header.tag {
            JUNK => {
                if header.size > max_junk_len {
                    tracing::warn!("`JUNK` chunk is suspiciously large ({} bytes)", header.size);
                    return Err(ExtractError::JunkTooLarge {
                        len: header.size,
                        max: max_junk_len,
                    });
                }

                let mut buf = vec![0_u8; header.size as usize];
                reader
                    .read_exact(&mut buf)
                    .inspect_err(|e| tracing::warn!("`JUNK` chunk was cut short. err: {e}"))?;
                tracing::debug!("found `JUNK` chunk! len: {}", buf.len());
                return Ok(Some(buf));
            }

            LIST => {
                let list_type = read_fourcc(reader)?;
                if list_type == MOVI {
                    tracing::debug!("reached movie data without finding a `JUNK` chunk");
                    return Ok(None);
                }

                // the list type we just read counts towards `size`
                skip(reader, header.size.saturating_sub(4))?;
            }

            _ => skip(reader, header.size)?,
        }
    }
}

fn read_fourcc<R: Read>(reader: &mut R) -> Result<[u8; 4], ExtractError> {
    let mut fourcc = [0_u8; 4];
    reader.read_exact(&mut fourcc)?;
    Ok(fourcc)
}

fn skip<R: Seek>(reader: &mut R, len: u32) -> Result<(), ExtractError> {
    reader.seek(SeekFrom::Current(i64::from(len)))?;
    Ok(())
}

fn fourcc_str(fourcc: &[u8; 4]) -> String {
    String::from_utf8_lossy(fourcc).into_owned()
}
