use crate::config::ConfigError;
use crate::ser::{SerError, SerKind};
use crate::types::TypeError;

/// Failure raised while decoding, validating or analysing a program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The bitstream itself is malformed (truncation, bad padding, trailing
    /// bytes or an out-of-range positive integer).
    #[error("malformed encoding: {0}")]
    MalformedEncoding(#[from] SerError),
    /// A node code outside the supported combinator set.
    #[error("node {index}: unsupported node code `{tag}`")]
    InvalidNodeTag {
        /// Index of the offending node.
        index: usize,
        /// Name of the rejected code.
        tag: &'static str,
    },
    /// A child offset pointed before the first node.
    #[error("node {index}: child offset {offset} is out of range")]
    BadIndex {
        /// Index of the offending node.
        index: usize,
        /// Decoded relative offset.
        offset: usize,
    },
    /// An in-memory node referenced itself or a later node.
    #[error("node {index}: child {child} does not precede its parent")]
    ForwardReference {
        /// Index of the offending node.
        index: usize,
        /// Referenced child index.
        child: usize,
    },
    /// The supplied limits are unusable.
    #[error("invalid limits: {0}")]
    InvalidLimits(#[from] ConfigError),
    /// The program declared zero nodes.
    #[error("program has no nodes")]
    EmptyProgram,
    /// The declared node count exceeds the configured limit.
    #[error("program declares {count} nodes, limit is {limit}")]
    TooManyNodes {
        /// Declared number of nodes.
        count: usize,
        /// Configured maximum.
        limit: usize,
    },
    /// An input byte string exceeds the configured limit.
    #[error("{kind} input is {len} bytes, limit is {limit}")]
    InputTooLarge {
        /// Which input was too large.
        kind: SerKind,
        /// Input length in bytes.
        len: usize,
        /// Configured maximum.
        limit: usize,
    },
    /// A hidden node appears somewhere other than one branch of a case.
    #[error("node {index}: hidden child is not allowed here")]
    HiddenChild {
        /// Index of the parent node.
        index: usize,
    },
    /// The root itself is a hidden node.
    #[error("root node is hidden")]
    HiddenRoot,
    /// Node order differs from the canonical post-order traversal.
    #[error("node {index} is not in canonical order")]
    NotInCanonicalOrder {
        /// First position where the order diverges.
        index: usize,
    },
    /// A node that needs a type has none, such as a hidden node used where
    /// a typed node is required.
    #[error("node {index} has no inferred type")]
    Untyped {
        /// Index of the node.
        index: usize,
    },
    /// Type inference failed.
    #[error("type mismatch: {0}")]
    TypeMismatch(#[from] TypeError),
    /// Two nodes are identical and should have been shared.
    #[error("nodes {first} and {second} are identical; sharing is not maximal")]
    SharingNotMaximal {
        /// Earlier node.
        first: usize,
        /// Later duplicate.
        second: usize,
    },
    /// A supplied witness value does not inhabit the witness node's type.
    #[error("witness node {node}: value does not match its type")]
    WitnessTypeMismatch {
        /// Index of the witness node.
        node: usize,
    },
    /// The number of supplied witness values differs from the number of
    /// witness nodes.
    #[error("expected {expected} witness values, got {got}")]
    WitnessCountMismatch {
        /// Number of witness nodes.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
    /// The witness bitstream is too short or too long for the witness types.
    #[error("witness data has {available} bits, decoding stopped at bit {consumed}")]
    WitnessLengthMismatch {
        /// Bits available in the witness bytes.
        available: usize,
        /// Bits consumed when the mismatch was detected.
        consumed: usize,
    },
    /// The program cost exceeds the configured budget.
    #[error("program cost {cost} exceeds budget {budget}")]
    CostExceeded {
        /// Cost of the program in milli weight units.
        cost: u32,
        /// Configured budget.
        budget: u32,
    },
}

/// Convenient alias for decoding results.
pub type DecodeResult<T> = core::result::Result<T, DecodeError>;
