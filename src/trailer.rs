use crate::chunks::{iend, parse_signature};
use crate::error::{Error, Result};

/// Splices `length:u32 | payload` immediately after the terminal chunk.
/// Insertion happens outside the chunk stream, so no chunk CRC changes.
pub fn append_trailer(source: &[u8], payload: &[u8]) -> Result<Vec<u8>> {
    let insert_at = trailer_start(source)?;
    let length = u32::try_from(payload.len())
        .map_err(|_| Error::InvalidArguments("trailer payload does not fit a u32 length prefix"))?;
    let mut out = Vec::with_capacity(source.len() + 4 + payload.len());
    out.extend_from_slice(&source[..insert_at]);
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&source[insert_at..]);
    Ok(out)
}

/// Reads the trailing payload back out. `Ok(None)` when the buffer ends
/// exactly at the terminal chunk.
pub fn extract_trailer(source: &[u8]) -> Result<Option<Vec<u8>>> {
    let start = trailer_start(source)?;
    let rest = &source[start..];
    if rest.is_empty() {
        return Ok(None);
    }
    if rest.len() < 4 {
        return Err(Error::CorruptTrailer("length prefix truncated"));
    }
    let declared = u32::from_be_bytes(
        rest[..4]
            .try_into()
            .expect("4 bytes should have been taken"),
    ) as usize;
    let payload = rest[4..]
        .get(..declared)
        .ok_or(Error::CorruptTrailer("declared length exceeds available data"))?;
    Ok(Some(payload.to_vec()))
}

pub fn extract_trailer_text(source: &[u8]) -> Result<Option<String>> {
    match extract_trailer(source)? {
        Some(bytes) => Ok(Some(String::from_utf8(bytes)?)),
        None => Ok(None),
    }
}

// The terminal chunk is found by searching for its fixed 12 bytes rather
// than walking the stream; the rightmost match wins because chunk data may
// contain the same byte pattern.
fn trailer_start(source: &[u8]) -> Result<usize> {
    parse_signature(source).map_err(|_| Error::InvalidFormat("not a PNG file"))?;
    let marker_at = source
        .windows(iend::MARKER.len())
        .rposition(|window| window == iend::MARKER)
        .ok_or(Error::InvalidFormat("no terminal chunk found"))?;
    Ok(marker_at + iend::MARKER.len())
}
