use serde::{Serialize, Serializer};

use crate::Progress;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid magic {:?} (expected \"GVAS\")", String::from_utf8_lossy(.found))]
    BadMagic { found: [u8; 4] },
    #[error("unexpected end of data at 0x{offset:X}: need {needed} bytes, {remaining} remaining")]
    UnexpectedEnd {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
    #[error("invalid string encoding at 0x{offset:X}")]
    InvalidString { offset: usize },
    #[error("unknown type {type_name:?}")]
    UnrecognizedType { type_name: String },
    #[error("maximum nesting depth {depth} reached")]
    DepthExceeded { depth: usize },
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Header could not be decoded so no properties were attempted
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("fatal error at offset 0x{offset:X}: {error}")]
pub struct ParseError {
    pub offset: usize,
    pub error: Error,
    pub progress: Progress,
}

/// A non-fatal error recorded while decoding a single property.
///
/// `offset` is where the failing property began, `path` the dotted chain of
/// enclosing property names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub offset: usize,
    pub path: String,
    pub error: Error,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "Error at 0x{:X}: {}", self.offset, self.error)
        } else {
            write!(f, "Error at 0x{:X} in {}: {}", self.offset, self.path, self.error)
        }
    }
}
