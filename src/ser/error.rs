use core::fmt;

/// Context markers used when reporting bitstream failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerKind {
    /// Program bitstream carrying the node encodings.
    Program,
    /// Witness bitstream carrying compact witness values.
    Witness,
}

impl fmt::Display for SerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerKind::Program => write!(f, "program"),
            SerKind::Witness => write!(f, "witness"),
        }
    }
}

/// Bit-level serialization error surfaced while encoding or decoding data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerError {
    /// Input ended before the expected number of bits were read.
    #[error("{kind} bitstream ended early while reading {field}")]
    UnexpectedEnd {
        /// Bitstream that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// A positive integer code described a value of 2^31 or more.
    #[error("{kind} bitstream encodes an out-of-range natural for {field}")]
    NaturalOverflow {
        /// Bitstream that failed to decode.
        kind: SerKind,
        /// Field that was being processed.
        field: &'static str,
    },
    /// The final partial byte contained non-zero padding bits.
    #[error("{kind} bitstream has non-zero padding after bit {position}")]
    IllegalPadding {
        /// Bitstream that failed to decode.
        kind: SerKind,
        /// Bit position where the padding starts.
        position: usize,
    },
    /// At least one whole unused byte remained after the payload.
    #[error("{kind} bitstream has {remaining} unused bits after bit {consumed}")]
    TrailingBytes {
        /// Bitstream that failed to decode.
        kind: SerKind,
        /// Bit position reached by the decoder.
        consumed: usize,
        /// Number of unread bits.
        remaining: usize,
    },
}

impl SerError {
    /// Creates an unexpected-end error helper.
    pub fn unexpected_end(kind: SerKind, field: &'static str) -> Self {
        SerError::UnexpectedEnd { kind, field }
    }

    /// Creates a natural-overflow error helper.
    pub fn natural_overflow(kind: SerKind, field: &'static str) -> Self {
        SerError::NaturalOverflow { kind, field }
    }

    /// Creates an illegal-padding error helper.
    pub fn illegal_padding(kind: SerKind, position: usize) -> Self {
        SerError::IllegalPadding { kind, position }
    }

    /// Creates a trailing-bytes error helper.
    pub fn trailing_bytes(kind: SerKind, consumed: usize, remaining: usize) -> Self {
        SerError::TrailingBytes {
            kind,
            consumed,
            remaining,
        }
    }

    /// Returns the bitstream associated with the error.
    pub fn kind(&self) -> SerKind {
        match *self {
            SerError::UnexpectedEnd { kind, .. }
            | SerError::NaturalOverflow { kind, .. }
            | SerError::IllegalPadding { kind, .. }
            | SerError::TrailingBytes { kind, .. } => kind,
        }
    }
}

/// Convenient alias for serialization results.
pub type SerResult<T> = core::result::Result<T, SerError>;
