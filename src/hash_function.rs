//! Modified SDBM hash over the `Display` text of a key.
//!
//! The per-byte step is `(byte << 8) + (hash << 6) + (hash << 16) - hash`.
//! Classic SDBM adds the raw byte; the shifted byte is kept here so hash
//! codes and slot indices match tables built with this exact recurrence.

use core::fmt::Display;

/// `65599 == (1 << 6) + (1 << 16) - 1`, the multiplier hidden in the shifts.
const SDBM_MULTIPLIER: u128 = 65_599;

/// Maps the canonical text of a key to a hash code, and a hash code to a slot.
///
/// `HashTable` renders every key with `Display` and hands the UTF-8 bytes
/// to this trait; implementations never see the key type itself.
pub trait HashFunction {
    /// Hash the UTF-8 bytes of a key's canonical text.
    fn hash_bytes(&self, bytes: &[u8]) -> u64;

    /// Reduce the hash of `bytes` to an index in `0..table_size`.
    ///
    /// `table_size` is never zero. `HashTable` reduces the result modulo
    /// `table_size` once more, so an out-of-range index lands in the table.
    fn slot(&self, bytes: &[u8], table_size: usize) -> usize {
        (self.hash_bytes(bytes) % table_size as u64) as usize
    }
}

/// The modified SDBM hash. Default hash function of `HashTable`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Sdbm;

impl Sdbm {
    #[inline]
    fn step(hash: u64, byte: u8) -> u64 {
        let shifted = u64::from(byte) << 8;
        shifted
            .wrapping_add(hash << 6)
            .wrapping_add(hash << 16)
            .wrapping_sub(hash)
    }
}

impl HashFunction for Sdbm {
    /// Low 64 bits of the unbounded hash.
    fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        bytes.iter().fold(0, |hash, &b| Self::step(hash, b))
    }

    /// Residue of the unbounded hash, not of its low 64 bits. The two agree
    /// for power-of-two sizes and diverge otherwise once the hash overflows.
    fn slot(&self, bytes: &[u8], table_size: usize) -> usize {
        let modulus = table_size as u128;
        let residue = bytes.iter().fold(0u128, |r, &b| {
            (r * SDBM_MULTIPLIER + (u128::from(b) << 8)) % modulus
        });
        residue as usize
    }
}

/// Hash code of `key`'s `Display` text under [`Sdbm`].
///
/// Keys with the same text hash the same regardless of type, so `42_i32`
/// and `"42"` share a hash code.
pub fn hashcode<K>(key: &K) -> u64
where
    K: ?Sized + Display,
{
    Sdbm.hash_bytes(key.to_string().as_bytes())
}
