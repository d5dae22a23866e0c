use thiserror::Error;

/// BSOR magic number as it appears in the first four bytes (little-endian).
pub const BSOR_MAGIC: u32 = 0x442d3d69;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Not a BSOR file (magic {magic:#010x})")]
    NotBsorFormat { magic: u32 },

    #[error("Unknown BSOR version: {0}")]
    UnknownVersion(u8),

    #[error("Unknown part tag {tag} at offset {offset}")]
    UnknownPart { tag: u8, offset: u64 },

    #[error("Unexpected end of input at offset {offset}: {needed} more bytes required")]
    TruncatedInput { offset: u64, needed: usize },

    #[error("Failed to decode field '{field}': {message}")]
    FieldDecode { field: &'static str, message: String },

    #[error("Could not resynchronize string field '{field}' at offset {offset} after {steps} steps")]
    StringResync {
        field: &'static str,
        offset: u64,
        steps: u32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    TruncatedInput,
    FieldDecode,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotBsorFormat { .. }
            | Error::UnknownVersion(_)
            | Error::UnknownPart { .. }
            | Error::StringResync { .. } => ErrorKind::Format,
            Error::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            Error::FieldDecode { .. } => ErrorKind::FieldDecode,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn field(field: &'static str, message: impl Into<String>) -> Self {
        Error::FieldDecode {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
