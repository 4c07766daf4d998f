use crate::chunks::{find_chunk, ihdr, ihdr::IHDRChunk, ChunkDescriptor, ParseableChunk};
use crate::error::{Error, Result};

/// Target dimensions for a header patch. Exactly one of an explicit
/// width/height pair, a single dimension (optionally aspect-locked), or a
/// uniform scale factor must be given.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DimensionSpec {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub keep_aspect: bool,
    pub scale: Option<f64>,
}

impl DimensionSpec {
    pub(crate) fn resolve(&self, current: (u32, u32)) -> Result<(u32, u32)> {
        let (current_width, current_height) = current;
        if let Some(factor) = self.scale {
            if self.width.is_some() || self.height.is_some() {
                return Err(Error::InvalidArguments(
                    "scale factor cannot be combined with explicit dimensions",
                ));
            }
            if !factor.is_finite() || factor <= 0.0 {
                return Err(Error::InvalidArguments(
                    "scale factor must be positive and finite",
                ));
            }
            return Ok((
                scale_dimension(current_width, factor),
                scale_dimension(current_height, factor),
            ));
        }
        match (self.width, self.height) {
            (Some(width), Some(height)) => Ok((width.max(1), height.max(1))),
            (Some(width), None) => {
                let height = if self.keep_aspect {
                    ratio_dimension(current_height, width, current_width)
                } else {
                    current_height.max(1)
                };
                Ok((width.max(1), height))
            }
            (None, Some(height)) => {
                let width = if self.keep_aspect {
                    ratio_dimension(current_width, height, current_height)
                } else {
                    current_width.max(1)
                };
                Ok((width, height.max(1)))
            }
            (None, None) => Err(Error::InvalidArguments(
                "no target dimensions or scale factor given",
            )),
        }
    }
}

fn scale_dimension(value: u32, factor: f64) -> u32 {
    ((value as f64 * factor).round() as u32).max(1)
}

fn ratio_dimension(other: u32, target: u32, original: u32) -> u32 {
    ((other as f64 * target as f64 / original as f64).round() as u32).max(1)
}

pub fn query_dimensions(source: &[u8]) -> Result<(u32, u32)> {
    let (_, header) = find_header(source)?;
    Ok((header.width, header.height))
}

/// Rewrites width, height and the header CRC in a copy of the buffer.
/// Pixel data is untouched, so the result displays stretched.
pub fn patch_dimensions(source: &[u8], spec: &DimensionSpec) -> Result<Vec<u8>> {
    let (chunk, header) = find_header(source)?;
    let target = spec.resolve((header.width, header.height))?;
    Ok(apply(source, &chunk, header, target))
}

/// Same as [`patch_dimensions`], but the mutation only happens once the
/// caller-supplied decision approves the `(current, target)` pair;
/// `Ok(None)` means the caller declined and nothing was produced.
pub fn patch_dimensions_confirmed<F>(
    source: &[u8],
    spec: &DimensionSpec,
    confirm: F,
) -> Result<Option<Vec<u8>>>
where
    F: FnOnce((u32, u32), (u32, u32)) -> bool,
{
    let (chunk, header) = find_header(source)?;
    let current = (header.width, header.height);
    let target = spec.resolve(current)?;
    if !confirm(current, target) {
        return Ok(None);
    }
    Ok(Some(apply(source, &chunk, header, target)))
}

fn find_header(source: &[u8]) -> Result<(ChunkDescriptor, IHDRChunk)> {
    let chunk = match find_chunk(source, IHDRChunk::HEADER) {
        Ok(chunk) => chunk,
        Err(Error::ChunkNotFound(_)) => return Err(Error::MissingHeader),
        Err(e) => return Err(e),
    };
    if chunk.data_length != ihdr::DATA_LENGTH {
        return Err(Error::InvalidFormat("header chunk has wrong length"));
    }
    let (_, header) = IHDRChunk::from_bytes(chunk.data(source))
        .map_err(|_| Error::InvalidFormat("truncated header chunk"))?;
    Ok((chunk, header))
}

fn apply(
    source: &[u8],
    chunk: &ChunkDescriptor,
    mut header: IHDRChunk,
    target: (u32, u32),
) -> Vec<u8> {
    header.width = target.0;
    header.height = target.1;
    let mut out = source.to_vec();
    out[chunk.span()].copy_from_slice(&header.to_bytes());
    out
}
