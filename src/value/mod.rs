//! Structured values and their compact bit encoding.
//!
//! The compact encoding of a value relative to its type writes nothing for
//! the unit type, one tag bit (`0` left, `1` right) followed by the branch
//! for a sum, and both components in order for a product. Subtrees of zero
//! bit width are skipped entirely. [`Value::Unit`] is the only accepted
//! value of a zero-width type, so decoding returns exactly what was encoded.

use crate::ser::BitString;
use crate::types::{Type, TypeKind};

/// Failure converting between values and compact bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// The value does not inhabit the requested type.
    #[error("value does not inhabit the requested type")]
    TypeMismatch,
    /// The bits ended before the value was complete.
    #[error("bitstring ended after {consumed} bits")]
    EndOfBits {
        /// Bits consumed before running out.
        consumed: usize,
    },
    /// Bits remained after the value was complete.
    #[error("{unused} bits remain after the value")]
    TrailingBits {
        /// Unread bits.
        unused: usize,
    },
}

/// A value of some Simplicity type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    /// The unit value.
    Unit,
    /// Left injection into a sum.
    Left(Box<Value>),
    /// Right injection into a sum.
    Right(Box<Value>),
    /// A pair.
    Product(Box<Value>, Box<Value>),
}

enum Step<'a> {
    Decode(&'a Type),
    WrapLeft,
    WrapRight,
    Pair,
}

impl Value {
    /// Left injection of `inner`.
    pub fn left(inner: Value) -> Self {
        Value::Left(Box::new(inner))
    }

    /// Right injection of `inner`.
    pub fn right(inner: Value) -> Self {
        Value::Right(Box::new(inner))
    }

    /// Pair of `left` and `right`.
    pub fn product(left: Value, right: Value) -> Self {
        Value::Product(Box::new(left), Box::new(right))
    }

    /// A bit as a value of `2 = 1 + 1`.
    pub fn bit(bit: bool) -> Self {
        if bit {
            Value::right(Value::Unit)
        } else {
            Value::left(Value::Unit)
        }
    }

    /// A big-endian word of `bits` bits (a power of two) as nested products
    /// of bits.
    pub fn word(value: u64, bits: u32) -> Self {
        if bits <= 1 {
            return Value::bit(value & 1 == 1);
        }
        let half = bits / 2;
        let high = if half >= 64 { 0 } else { value >> half };
        let low_mask = if half >= 64 { u64::MAX } else { (1u64 << half) - 1 };
        Value::product(Value::word(high, half), Value::word(value & low_mask, half))
    }

    /// Appends the compact encoding of `self` relative to `ty` to `out`.
    pub fn encode_compact(&self, ty: &Type, out: &mut BitString) -> Result<(), ValueError> {
        let mut stack = vec![(self, ty)];
        while let Some((value, ty)) = stack.pop() {
            if ty.bit_width() == 0 {
                if *value != Value::Unit {
                    return Err(ValueError::TypeMismatch);
                }
                continue;
            }
            match (value, ty.kind()) {
                (Value::Unit, TypeKind::Unit) => {}
                (Value::Left(inner), TypeKind::Sum(left, _)) => {
                    out.push(false);
                    stack.push((inner.as_ref(), left));
                }
                (Value::Right(inner), TypeKind::Sum(_, right)) => {
                    out.push(true);
                    stack.push((inner.as_ref(), right));
                }
                (Value::Product(first, second), TypeKind::Product(left, right)) => {
                    stack.push((second.as_ref(), right));
                    stack.push((first.as_ref(), left));
                }
                _ => return Err(ValueError::TypeMismatch),
            }
        }
        Ok(())
    }

    /// Returns the compact encoding of `self` relative to `ty`.
    pub fn to_compact_bits(&self, ty: &Type) -> Result<BitString, ValueError> {
        let mut out = BitString::new();
        self.encode_compact(ty, &mut out)?;
        Ok(out)
    }

    /// Decodes a value of type `ty` that must use every bit of `bits`.
    pub fn from_compact_bits(bits: &BitString, ty: &Type) -> Result<Value, ValueError> {
        let mut reader = bits.iter();
        let mut consumed = 0usize;
        let mut steps = vec![Step::Decode(ty)];
        let mut values: Vec<Value> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Decode(ty) if ty.bit_width() == 0 => values.push(Value::Unit),
                Step::Decode(ty) => match ty.kind() {
                    TypeKind::Unit => values.push(Value::Unit),
                    TypeKind::Sum(left, right) => {
                        let bit = reader.next().ok_or(ValueError::EndOfBits { consumed })?;
                        consumed += 1;
                        if bit {
                            steps.push(Step::WrapRight);
                            steps.push(Step::Decode(right));
                        } else {
                            steps.push(Step::WrapLeft);
                            steps.push(Step::Decode(left));
                        }
                    }
                    TypeKind::Product(left, right) => {
                        steps.push(Step::Pair);
                        steps.push(Step::Decode(right));
                        steps.push(Step::Decode(left));
                    }
                },
                Step::WrapLeft | Step::WrapRight => {
                    let inner = values.pop().ok_or(ValueError::TypeMismatch)?;
                    values.push(if matches!(step, Step::WrapLeft) {
                        Value::left(inner)
                    } else {
                        Value::right(inner)
                    });
                }
                Step::Pair => {
                    let second = values.pop().ok_or(ValueError::TypeMismatch)?;
                    let first = values.pop().ok_or(ValueError::TypeMismatch)?;
                    values.push(Value::product(first, second));
                }
            }
        }
        let unused = bits.len() - consumed;
        if unused > 0 {
            return Err(ValueError::TrailingBits { unused });
        }
        values.pop().ok_or(ValueError::TypeMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(text: &str) -> BitString {
        BitString::from_bits(text.chars().map(|c| c == '1'))
    }

    #[test]
    fn sums_write_a_tag_bit_and_skip_unit_payloads() {
        let ty = Type::sum(Type::product(Type::bit(), Type::bit()), Type::unit());
        let value = Value::left(Value::product(Value::bit(true), Value::bit(true)));
        assert_eq!(value.to_compact_bits(&ty).unwrap(), bits("011"));
        assert_eq!(Value::right(Value::Unit).to_compact_bits(&ty).unwrap(), bits("1"));
        assert_eq!(Value::from_compact_bits(&bits("011"), &ty).unwrap(), value);
    }

    #[test]
    fn zero_width_types_accept_the_unit_value() {
        let ty = Type::product(Type::unit(), Type::unit());
        assert!(Value::Unit.to_compact_bits(&ty).unwrap().is_empty());
        assert_eq!(
            Value::from_compact_bits(&BitString::new(), &ty).unwrap(),
            Value::Unit
        );
    }

    #[test]
    fn zero_width_types_reject_structured_values() {
        let ty = Type::product(Type::unit(), Type::unit());
        let spelled_out = Value::product(Value::Unit, Value::Unit);
        assert_eq!(spelled_out.to_compact_bits(&ty), Err(ValueError::TypeMismatch));

        let wider = Type::product(ty, Type::bit());
        assert_eq!(
            Value::product(spelled_out, Value::bit(true)).to_compact_bits(&wider),
            Err(ValueError::TypeMismatch)
        );
        let value = Value::product(Value::Unit, Value::bit(true));
        let encoded = value.to_compact_bits(&wider).unwrap();
        assert_eq!(encoded, bits("1"));
        assert_eq!(Value::from_compact_bits(&encoded, &wider).unwrap(), value);
    }

    #[test]
    fn mismatches_are_reported() {
        let ty = Type::bit();
        assert_eq!(
            Value::product(Value::Unit, Value::Unit).to_compact_bits(&ty),
            Err(ValueError::TypeMismatch)
        );
        assert_eq!(
            Value::from_compact_bits(&BitString::new(), &ty),
            Err(ValueError::EndOfBits { consumed: 0 })
        );
        assert_eq!(
            Value::from_compact_bits(&bits("10"), &ty),
            Err(ValueError::TrailingBits { unused: 1 })
        );
    }

    #[test]
    fn words_are_big_endian() {
        let ty = Type::product(
            Type::product(Type::bit(), Type::bit()),
            Type::product(Type::bit(), Type::bit()),
        );
        assert_eq!(Value::word(0b1010, 4).to_compact_bits(&ty).unwrap(), bits("1010"));
    }
}
