mod chunks;
mod error;
mod patch;
mod trailer;

pub use chunks::crc::calculate_crc;
pub use chunks::{find_chunk, iter_chunks, parse_signature, ChunkDescriptor, ChunkIter, SIGNATURE};
pub use error::{Error, Result};
pub use patch::{patch_dimensions, patch_dimensions_confirmed, query_dimensions, DimensionSpec};
pub use trailer::{append_trailer, extract_trailer, extract_trailer_text};
