pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid PNG: {0}")]
    InvalidFormat(&'static str),

    #[error("no header chunk found")]
    MissingHeader,

    #[error("chunk {} not found", String::from_utf8_lossy(.0))]
    ChunkNotFound([u8; 4]),

    #[error("corrupt trailer: {0}")]
    CorruptTrailer(&'static str),

    #[error("invalid dimension spec: {0}")]
    InvalidArguments(&'static str),

    #[error("trailer is not valid UTF-8")]
    EncodingError(#[from] std::string::FromUtf8Error),
}
