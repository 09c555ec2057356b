use super::cursor::BitReader;
use super::error::{SerError, SerKind, SerResult};
use super::writer::BitWriter;

/// Largest value representable by the positive integer code.
pub const MAX_NATURAL: u32 = (1 << 31) - 1;

// Each nesting level doubles the exponent, so no valid code has more than
// four leading ones before the terminating zero.
const MAX_NESTING: usize = 4;

/// Reads a positive integer in `1..=MAX_NATURAL`.
///
/// `1` is the single bit `0`; any larger `n` with `k = floor(log2 n)` is a
/// `1`, followed by the code of `k`, followed by the low `k` bits of `n`.
pub fn read_natural(
    cursor: &mut BitReader<'_>,
    kind: SerKind,
    field: &'static str,
) -> SerResult<u32> {
    let mut nesting = 0usize;
    while cursor.read_bit(kind, field)? {
        nesting += 1;
        if nesting > MAX_NESTING {
            return Err(SerError::natural_overflow(kind, field));
        }
    }
    let mut value = 1u32;
    for _ in 0..nesting {
        if value > 30 {
            return Err(SerError::natural_overflow(kind, field));
        }
        let low = cursor.read_bits(value as usize, kind, field)? as u32;
        value = (1 << value) | low;
    }
    Ok(value)
}

/// Writes a positive integer using the code read by [`read_natural`].
///
/// Values outside `1..=MAX_NATURAL` cannot be represented.
pub fn write_natural(
    out: &mut BitWriter,
    value: u32,
    kind: SerKind,
    field: &'static str,
) -> SerResult<()> {
    if value == 0 || value > MAX_NATURAL {
        return Err(SerError::natural_overflow(kind, field));
    }
    let mut chain = vec![value];
    while let Some(&last) = chain.last() {
        if last == 1 {
            break;
        }
        chain.push(31 - last.leading_zeros());
    }
    for _ in 1..chain.len() {
        out.write_bit(true);
    }
    out.write_bit(false);
    for pair in chain.windows(2).rev() {
        let (outer, width) = (pair[0], pair[1]);
        out.write_bits(u64::from(outer), width as usize);
    }
    Ok(())
}

/// Number of bits [`write_natural`] emits for `value`.
pub fn natural_bit_len(value: u32) -> usize {
    if value <= 1 {
        return 1;
    }
    let width = 31 - value.leading_zeros();
    1 + natural_bit_len(width) + width as usize
}
