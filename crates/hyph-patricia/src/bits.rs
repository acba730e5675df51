//! Bit addressing over byte-string keys.
//!
//! Bits are numbered from the most significant bit of byte 0 onward. Reads
//! past the end of a key, and reads at negative indices, yield 0: every key
//! behaves as if it were padded with zero bytes forever.

/// Critical bit of the synthetic root node.
pub const ROOT_BIT: i64 = -1;

#[inline]
fn byte_at(key: &[u8], index: usize) -> u8 {
    key.get(index).copied().unwrap_or(0)
}

/// Read bit `bit` of `key` as a child slot (0 or 1).
#[inline]
#[must_use]
pub fn bit_at(key: &[u8], bit: i64) -> usize {
    let Ok(bit) = u64::try_from(bit) else {
        return 0;
    };
    let Ok(byte) = usize::try_from(bit >> 3) else {
        return 0;
    };
    let mask = 0x80u8 >> (bit & 7);
    usize::from(byte_at(key, byte) & mask != 0)
}

/// Whether every bit of `key` is zero. The empty key counts as zero.
#[inline]
#[must_use]
pub fn is_zero_key(key: &[u8]) -> bool {
    key.iter().all(|&b| b == 0)
}

/// First bit at which `a` and `b` differ, comparing both as zero padded.
///
/// Returns `None` when the keys are equal under padding, which includes
/// identical keys and keys that differ only by trailing `0x00` bytes.
#[must_use]
pub fn critical_bit(a: &[u8], b: &[u8]) -> Option<i64> {
    let len = a.len().max(b.len());
    (0..len).find_map(|i| {
        let diff = byte_at(a, i) ^ byte_at(b, i);
        (diff != 0).then(|| (i as i64) * 8 + i64::from(diff.leading_zeros()))
    })
}
