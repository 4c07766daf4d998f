use crate::chunks::crc::calculate_crc;
use nom::{bytes::complete::take, number::complete::be_u32, sequence::tuple, IResult};

use super::ParseableChunk;

pub(crate) const DATA_LENGTH: usize = 13;

/// The non-dimension fields are carried as raw bytes and written back
/// verbatim, so a patch cannot reject or alter an unusual but well-formed
/// header.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IHDRChunk {
    pub width: u32,
    pub height: u32,
    pub(crate) bit_depth: u8,
    pub(crate) color_type: u8,
    pub(crate) compression_method: u8,
    pub(crate) filter_method: u8,
    pub(crate) interlace_method: u8,
}

impl<'a> ParseableChunk<'a> for IHDRChunk {
    type Output = Vec<u8>;

    const HEADER: &'static [u8; 4] = b"IHDR";

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (rest, (width, height, other_bytes)) =
            tuple((be_u32, be_u32, take(5usize)))(chunk_data)?;
        Ok((
            rest,
            IHDRChunk {
                width,
                height,
                bit_depth: other_bytes[0],
                color_type: other_bytes[1],
                compression_method: other_bytes[2],
                filter_method: other_bytes[3],
                interlace_method: other_bytes[4],
            },
        ))
    }

    fn to_bytes(&self) -> Self::Output {
        let mut bytes = vec![0, 0, 0, DATA_LENGTH as u8];
        bytes.extend(Self::HEADER);
        bytes.extend(&self.width.to_be_bytes());
        bytes.extend(&self.height.to_be_bytes());
        bytes.extend(&[
            self.bit_depth,
            self.color_type,
            self.compression_method,
            self.filter_method,
            self.interlace_method,
        ]);
        let crc = calculate_crc(bytes[4..].iter().copied()).to_be_bytes();
        bytes.extend(crc);
        bytes
    }
}
