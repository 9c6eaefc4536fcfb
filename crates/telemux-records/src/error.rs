/// Errors that can occur while encoding or decoding sensor records.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The destination buffer cannot hold a full record. Nothing is written.
    #[error("buffer too small ({got} bytes, record needs {needed})")]
    BufferTooSmall { needed: usize, got: usize },

    /// The source buffer is shorter than a full record.
    #[error("truncated record ({got} bytes, record needs {needed})")]
    Truncated { needed: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
