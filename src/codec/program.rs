use tracing::{debug, trace};

use super::error::{DecodeError, DecodeResult};
use crate::config::DecodeLimits;
use crate::hash::Digest256;
use crate::node::{Combinator, Expression, NodeId};
use crate::ser::{read_natural, write_natural, BitReader, BitWriter, SerKind, SerResult};

const KIND: SerKind = SerKind::Program;

/// Decodes a program using [`DecodeLimits::default`].
pub fn decode_program(bytes: &[u8]) -> DecodeResult<Expression> {
    decode_program_with_limits(bytes, &DecodeLimits::default())
}

/// Decodes, validates and type checks a program bitstream.
///
/// The stream is `N(len)` followed by `len` node encodings and fewer than
/// eight zero padding bits. Limits failing [`DecodeLimits::validate`] are
/// reported as [`DecodeError::InvalidLimits`].
pub fn decode_program_with_limits(bytes: &[u8], limits: &DecodeLimits) -> DecodeResult<Expression> {
    limits.validate()?;
    if bytes.len() > limits.max_program_bytes {
        return Err(DecodeError::InputTooLarge {
            kind: KIND,
            len: bytes.len(),
            limit: limits.max_program_bytes,
        });
    }
    let mut cursor = BitReader::new(bytes);
    let count = read_natural(&mut cursor, KIND, "node count")? as usize;
    if count > limits.max_nodes {
        return Err(DecodeError::TooManyNodes {
            count,
            limit: limits.max_nodes,
        });
    }

    // Every node takes at least four bits, which bounds the allocation for
    // counts that the input cannot possibly satisfy.
    let mut nodes = Vec::with_capacity(count.min(cursor.remaining() / 4 + 1));
    for index in 0..count {
        let node = decode_node(&mut cursor, index)?;
        trace!(node = index, combinator = node.tag().name(), "decoded node");
        nodes.push(node);
    }
    cursor.finish(KIND)?;
    debug!(nodes = count, bytes = bytes.len(), "program bitstream decoded");

    Expression::from_nodes(nodes)
}

fn decode_node(cursor: &mut BitReader<'_>, index: usize) -> DecodeResult<Combinator> {
    if cursor.read_bit(KIND, "node code")? {
        let tag = if cursor.read_bit(KIND, "node code")? {
            "jet"
        } else {
            "word"
        };
        return Err(DecodeError::InvalidNodeTag { index, tag });
    }
    if !cursor.read_bit(KIND, "node code")? {
        let code = cursor.read_bits(3, KIND, "node code")?;
        let node = match code {
            0 => Combinator::Comp(child(cursor, index)?, child(cursor, index)?),
            1 => Combinator::Case(child(cursor, index)?, child(cursor, index)?),
            2 => Combinator::Pair(child(cursor, index)?, child(cursor, index)?),
            3 => Combinator::Disconnect(child(cursor, index)?, child(cursor, index)?),
            4 => Combinator::InjL(child(cursor, index)?),
            5 => Combinator::InjR(child(cursor, index)?),
            6 => Combinator::Take(child(cursor, index)?),
            _ => Combinator::Drop(child(cursor, index)?),
        };
        return Ok(node);
    }
    if !cursor.read_bit(KIND, "node code")? {
        return match cursor.read_bits(2, KIND, "node code")? {
            0 => Ok(Combinator::Iden),
            1 => Ok(Combinator::Unit),
            2 => Err(DecodeError::InvalidNodeTag { index, tag: "fail" }),
            _ => Err(DecodeError::InvalidNodeTag { index, tag: "stop" }),
        };
    }
    if cursor.read_bit(KIND, "node code")? {
        return Ok(Combinator::Witness);
    }
    let payload = cursor.read_array::<32>(KIND, "hidden payload")?;
    Ok(Combinator::Hidden(Digest256::from_bytes(payload)))
}

fn child(cursor: &mut BitReader<'_>, index: usize) -> DecodeResult<NodeId> {
    let offset = read_natural(cursor, KIND, "child offset")? as usize;
    if offset > index {
        return Err(DecodeError::BadIndex { index, offset });
    }
    Ok(NodeId::new(index - offset))
}

/// Encodes an expression into its canonical program bitstream.
///
/// Decoding the result yields an identical expression.
pub fn encode_program(expr: &Expression) -> SerResult<Vec<u8>> {
    let mut out = BitWriter::new();
    let count = u32::try_from(expr.len()).unwrap_or(u32::MAX);
    write_natural(&mut out, count, KIND, "node count")?;
    for (index, node) in expr.nodes().iter().enumerate() {
        let (code, width) = match node {
            Combinator::Comp(..) => (0b00000, 5),
            Combinator::Case(..) | Combinator::AssertL(..) | Combinator::AssertR(..) => {
                (0b00001, 5)
            }
            Combinator::Pair(..) => (0b00010, 5),
            Combinator::Disconnect(..) => (0b00011, 5),
            Combinator::InjL(_) => (0b00100, 5),
            Combinator::InjR(_) => (0b00101, 5),
            Combinator::Take(_) => (0b00110, 5),
            Combinator::Drop(_) => (0b00111, 5),
            Combinator::Iden => (0b01000, 5),
            Combinator::Unit => (0b01001, 5),
            Combinator::Hidden(_) => (0b0110, 4),
            Combinator::Witness => (0b0111, 4),
        };
        out.write_bits(code, width);
        if let Combinator::Hidden(payload) = node {
            out.write_bytes(&payload.to_bytes());
        }
        for child in node.children() {
            let offset = u32::try_from(index - child.index()).unwrap_or(u32::MAX);
            write_natural(&mut out, offset, KIND, "child offset")?;
        }
    }
    Ok(out.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_unit_program() {
        let expr = decode_program(&[0x24]).unwrap();
        assert_eq!(expr.nodes(), &[Combinator::Unit]);
        assert_eq!(encode_program(&expr).unwrap(), vec![0x24]);
    }

    #[test]
    fn reserved_codes_are_rejected() {
        // N(1) then `01010` (fail)
        assert_eq!(
            decode_program(&[0b0010_1000]).unwrap_err(),
            DecodeError::InvalidNodeTag { index: 0, tag: "fail" }
        );
        // N(1) then `11` (jet)
        assert_eq!(
            decode_program(&[0b0110_0000]).unwrap_err(),
            DecodeError::InvalidNodeTag { index: 0, tag: "jet" }
        );
    }

    #[test]
    fn child_offsets_must_stay_in_range() {
        // N(1) then `00110` (take) with offset N(1)
        assert_eq!(
            decode_program(&[0b0001_1000]).unwrap_err(),
            DecodeError::BadIndex { index: 0, offset: 1 }
        );
    }
}
