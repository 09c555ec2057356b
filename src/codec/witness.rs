use tracing::debug;

use super::error::{DecodeError, DecodeResult};
use crate::config::DecodeLimits;
use crate::node::Expression;
use crate::ser::{BitReader, BitString, BitWriter, SerError, SerKind};
use crate::types::{Type, TypeKind};
use crate::value::Value;

const KIND: SerKind = SerKind::Witness;

/// Compact value bits for every witness node of an expression, in node
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WitnessAssignment {
    values: Vec<BitString>,
}

impl WitnessAssignment {
    /// Assignment for an expression without witness nodes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Encodes one value per witness node against the node's output type.
    pub fn from_values(expr: &Expression, values: &[Value]) -> DecodeResult<Self> {
        let witnesses = expr.witness_nodes();
        if witnesses.len() != values.len() {
            return Err(DecodeError::WitnessCountMismatch {
                expected: witnesses.len(),
                got: values.len(),
            });
        }
        let mut encoded = Vec::with_capacity(values.len());
        for (&node, value) in witnesses.iter().zip(values) {
            let mismatch = DecodeError::WitnessTypeMismatch { node: node.index() };
            let arrow = expr.arrow(node).ok_or(mismatch.clone())?;
            let bits = value
                .to_compact_bits(&arrow.target)
                .map_err(|_| mismatch)?;
            encoded.push(bits);
        }
        Ok(Self { values: encoded })
    }

    /// Number of witness values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when there are no witness values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Compact bits of the `position`-th witness node.
    pub fn get(&self, position: usize) -> Option<&BitString> {
        self.values.get(position)
    }

    /// Iterates over the values in node order.
    pub fn iter(&self) -> impl Iterator<Item = &BitString> + '_ {
        self.values.iter()
    }

    /// Total number of value bits.
    pub fn bit_len(&self) -> usize {
        self.values.iter().map(BitString::len).sum()
    }

    /// Decodes the value of each witness node as a structured [`Value`].
    pub fn to_values(&self, expr: &Expression) -> DecodeResult<Vec<Value>> {
        self.check_count(expr)?;
        let mut values = Vec::with_capacity(self.values.len());
        for (&node, bits) in expr.witness_nodes().iter().zip(&self.values) {
            let mismatch = DecodeError::WitnessTypeMismatch { node: node.index() };
            let arrow = expr.arrow(node).ok_or(mismatch.clone())?;
            values.push(Value::from_compact_bits(bits, &arrow.target).map_err(|_| mismatch)?);
        }
        Ok(values)
    }

    pub(crate) fn check_count(&self, expr: &Expression) -> DecodeResult<()> {
        let expected = expr.witness_nodes().len();
        if self.values.len() != expected {
            return Err(DecodeError::WitnessCountMismatch {
                expected,
                got: self.values.len(),
            });
        }
        Ok(())
    }
}

/// Decodes witness bytes using [`DecodeLimits::default`].
pub fn decode_witness(bytes: &[u8], expr: &Expression) -> DecodeResult<WitnessAssignment> {
    decode_witness_with_limits(bytes, expr, &DecodeLimits::default())
}

/// Splits a witness bitstream into the values of `expr`'s witness nodes.
///
/// Each value is read against the node's inferred output type. The stream
/// must end with fewer than eight zero padding bits.
pub fn decode_witness_with_limits(
    bytes: &[u8],
    expr: &Expression,
    limits: &DecodeLimits,
) -> DecodeResult<WitnessAssignment> {
    limits.validate()?;
    if bytes.len() > limits.max_witness_bytes {
        return Err(DecodeError::InputTooLarge {
            kind: KIND,
            len: bytes.len(),
            limit: limits.max_witness_bytes,
        });
    }
    let available = bytes.len() * 8;
    let mut cursor = BitReader::new(bytes);
    let mut values = Vec::with_capacity(expr.witness_nodes().len());
    for &node in expr.witness_nodes() {
        let arrow = expr
            .arrow(node)
            .ok_or(DecodeError::WitnessTypeMismatch { node: node.index() })?;
        let bits = read_compact(&mut cursor, &arrow.target).map_err(|_| {
            DecodeError::WitnessLengthMismatch {
                available,
                consumed: cursor.position(),
            }
        })?;
        values.push(bits);
    }
    let consumed = cursor.position();
    cursor.finish(KIND).map_err(|err| match err {
        SerError::TrailingBytes { .. } => DecodeError::WitnessLengthMismatch {
            available,
            consumed,
        },
        other => DecodeError::MalformedEncoding(other),
    })?;
    debug!(
        witnesses = values.len(),
        bits = consumed,
        "witness bitstream decoded"
    );
    Ok(WitnessAssignment { values })
}

/// Copies the compact bits of one value of type `ty` out of `cursor`.
fn read_compact(cursor: &mut BitReader<'_>, ty: &Type) -> Result<BitString, SerError> {
    let mut bits = BitString::new();
    let mut pending = vec![ty];
    while let Some(ty) = pending.pop() {
        if ty.bit_width() == 0 {
            continue;
        }
        match ty.kind() {
            TypeKind::Unit => {}
            TypeKind::Sum(left, right) => {
                let bit = cursor.read_bit(KIND, "witness value")?;
                bits.push(bit);
                pending.push(if bit { right } else { left });
            }
            TypeKind::Product(left, right) => {
                pending.push(right);
                pending.push(left);
            }
        }
    }
    Ok(bits)
}

/// Concatenates the witness values and pads to a byte boundary.
pub fn encode_witness(witness: &WitnessAssignment) -> Vec<u8> {
    let mut out = BitWriter::new();
    for bits in witness.iter() {
        out.write_bit_string(bits);
    }
    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_program;
    use crate::node::ExpressionBuilder;

    // witness; unit; pair; unit; case; comp -- the witness is a single bit
    const BITCASE: [u8; 6] = [0xc9, 0xd2, 0x28, 0x48, 0x40, 0x50];

    #[test]
    fn bit_witness_roundtrip() {
        let expr = decode_program(&BITCASE).unwrap();
        let witness = decode_witness(&[0x80], &expr).unwrap();
        assert_eq!(witness.len(), 1);
        assert_eq!(witness.get(0), Some(&BitString::from_bits([true])));
        assert_eq!(encode_witness(&witness), vec![0x80]);
        assert_eq!(witness.to_values(&expr).unwrap(), vec![Value::bit(true)]);
    }

    #[test]
    fn witness_length_must_match() {
        let expr = decode_program(&BITCASE).unwrap();
        assert_eq!(
            decode_witness(&[], &expr).unwrap_err(),
            DecodeError::WitnessLengthMismatch {
                available: 0,
                consumed: 0,
            }
        );
        assert_eq!(
            decode_witness(&[0x80, 0x00], &expr).unwrap_err(),
            DecodeError::WitnessLengthMismatch {
                available: 16,
                consumed: 1,
            }
        );
        assert!(matches!(
            decode_witness(&[0xc0], &expr).unwrap_err(),
            DecodeError::MalformedEncoding(SerError::IllegalPadding { .. })
        ));
    }

    #[test]
    fn values_must_inhabit_the_witness_type() {
        let expr = decode_program(&BITCASE).unwrap();
        assert_eq!(
            WitnessAssignment::from_values(&expr, &[Value::Unit]).unwrap_err(),
            DecodeError::WitnessTypeMismatch { node: 0 }
        );
        assert_eq!(
            WitnessAssignment::from_values(&expr, &[]).unwrap_err(),
            DecodeError::WitnessCountMismatch {
                expected: 1,
                got: 0,
            }
        );
    }

    #[test]
    fn zero_width_witness_values_come_back_unchanged() {
        // the witness feeds `take unit`, so its type is 1 × 1
        let mut builder = ExpressionBuilder::new();
        let witness = builder.witness();
        let unit = builder.unit();
        let take = builder.take(unit);
        let root = builder.comp(witness, take);
        let expr = builder.finish(root).unwrap();

        let spelled_out = Value::product(Value::Unit, Value::Unit);
        assert_eq!(
            WitnessAssignment::from_values(&expr, &[spelled_out]).unwrap_err(),
            DecodeError::WitnessTypeMismatch { node: 0 }
        );
        let assignment = WitnessAssignment::from_values(&expr, &[Value::Unit]).unwrap();
        assert_eq!(assignment.bit_len(), 0);
        assert_eq!(assignment.to_values(&expr).unwrap(), vec![Value::Unit]);
    }
}
