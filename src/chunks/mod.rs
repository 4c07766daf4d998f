use nom::{bytes::complete::tag, IResult};

use crate::error::{Error, Result};

pub(crate) mod crc;
pub(crate) mod iend;
pub(crate) mod ihdr;

pub const SIGNATURE: &[u8; 8] = b"\x89PNG\x0d\x0a\x1a\x0a";

pub fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(SIGNATURE.as_slice())(input)
}

/// Offsets of one chunk inside the buffer it was parsed from. The walker
/// only hands out descriptors whose whole span fits that buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDescriptor {
    pub type_tag: [u8; 4],
    pub data_offset: usize,
    pub data_length: usize,
    pub crc_offset: usize,
}

impl ChunkDescriptor {
    pub fn start(&self) -> usize {
        self.data_offset - 8
    }

    pub fn end(&self) -> usize {
        self.crc_offset + 4
    }

    pub fn span(&self) -> std::ops::Range<usize> {
        self.start()..self.end()
    }

    pub fn data<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        &source[self.data_offset..self.crc_offset]
    }

    pub fn stored_crc(&self, source: &[u8]) -> u32 {
        let bytes = source[self.crc_offset..self.crc_offset + 4]
            .try_into()
            .expect("4 bytes should have been taken");
        u32::from_be_bytes(bytes)
    }
}

pub fn iter_chunks(source: &[u8]) -> Result<ChunkIter> {
    parse_signature(source).map_err(|_| Error::InvalidFormat("not a PNG file"))?;
    Ok(ChunkIter {
        source,
        cursor: SIGNATURE.len(),
        finished: false,
    })
}

pub fn find_chunk(source: &[u8], type_tag: &[u8; 4]) -> Result<ChunkDescriptor> {
    iter_chunks(source)?
        .find(|chunk| &chunk.type_tag == type_tag)
        .ok_or(Error::ChunkNotFound(*type_tag))
}

pub struct ChunkIter<'a> {
    source: &'a [u8],
    cursor: usize,
    finished: bool,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = ChunkDescriptor;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match descriptor_at(self.source, self.cursor) {
            Some((chunk, next_cursor)) => {
                self.cursor = next_cursor;
                if &chunk.type_tag == iend::IENDChunk::HEADER {
                    self.finished = true;
                }
                Some(chunk)
            }
            None => {
                // truncated chunk header, or declared length past the buffer
                self.finished = true;
                None
            }
        }
    }
}

fn descriptor_at(source: &[u8], start: usize) -> Option<(ChunkDescriptor, usize)> {
    let header = source.get(start..start.checked_add(8)?)?;
    let data_length = u32::from_be_bytes(
        header[..4]
            .try_into()
            .expect("4 bytes should have been taken"),
    ) as usize;
    let type_tag = header[4..8]
        .try_into()
        .expect("4 bytes should have been taken");
    let data_offset = start + 8;
    let crc_offset = data_offset.checked_add(data_length)?;
    let next_cursor = crc_offset.checked_add(4)?;
    if next_cursor > source.len() {
        return None;
    }
    Some((
        ChunkDescriptor {
            type_tag,
            data_offset,
            data_length,
            crc_offset,
        },
        next_cursor,
    ))
}

pub(crate) trait ParseableChunk<'a>: Sized {
    type Output: AsRef<[u8]>;
    const HEADER: &'static [u8; 4];

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self>;
    fn to_bytes(&self) -> Self::Output;
}
