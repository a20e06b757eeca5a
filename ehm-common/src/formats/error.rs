//! Errors raised while decoding .ehm data

/// Error type for reading EHM files.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Unexpected end of data at offset {offset}: needed {needed} more bytes")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("Invalid UTF-8 in name at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("Unknown animation channel id {id} at offset {offset}")]
    UnknownChannel { id: u8, offset: usize },

    #[error("Count {count} at offset {offset} does not fit in memory")]
    CountOverflow { count: u64, offset: usize },

    #[error("{remaining} trailing bytes after the animation block")]
    TrailingBytes { remaining: usize },
}
