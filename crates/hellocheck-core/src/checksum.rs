//! Rolling XOR checksum used to verify the greeting before it is printed.
//!
//! This is an integrity toy, not a cryptographic digest: it only catches
//! simple corruption of a constant byte string.

use std::fmt;

/// Number of accumulator slots.
pub const CHECKSUM_WIDTH: usize = 4;

/// Fixed-width rolling XOR accumulator.
///
/// Byte `n` of the input is XORed into slot `n % CHECKSUM_WIDTH`. Equality
/// compares the slots only; the cursor is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct XorChecksum {
    slots: [u8; CHECKSUM_WIDTH],
    cursor: usize,
}

impl XorChecksum {
    pub const fn new() -> Self {
        Self {
            slots: [0; CHECKSUM_WIDTH],
            cursor: 0,
        }
    }

    /// Checksum of a whole byte slice. Usable in const context so expected
    /// values can be computed at compile time.
    pub const fn of(bytes: &[u8]) -> Self {
        let mut sum = Self::new();
        let mut i = 0;
        while i < bytes.len() {
            sum = sum.step(bytes[i]);
            i += 1;
        }
        sum
    }

    /// XOR `byte` into the current slot and advance the cursor.
    pub fn accumulate(&mut self, byte: u8) -> &mut Self {
        *self = self.step(byte);
        self
    }

    pub const fn as_bytes(&self) -> &[u8; CHECKSUM_WIDTH] {
        &self.slots
    }

    /// Number of bytes accumulated so far.
    pub const fn len(&self) -> usize {
        self.cursor
    }

    pub const fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    const fn step(mut self, byte: u8) -> Self {
        self.slots[self.cursor % CHECKSUM_WIDTH] ^= byte;
        self.cursor = self.cursor.wrapping_add(1);
        self
    }
}

impl PartialEq for XorChecksum {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl Eq for XorChecksum {}

impl fmt::Display for XorChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.slots))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_checksum_is_zeroed() {
        let sum = XorChecksum::new();
        assert_eq!(sum.as_bytes(), &[0, 0, 0, 0]);
        assert!(sum.is_empty());
        assert_eq!(sum, XorChecksum::default());
    }

    #[test]
    fn bytes_rotate_through_slots() {
        let mut sum = XorChecksum::new();
        sum.accumulate(0x01)
            .accumulate(0x02)
            .accumulate(0x04)
            .accumulate(0x08)
            .accumulate(0x10);
        assert_eq!(sum.as_bytes(), &[0x11, 0x02, 0x04, 0x08]);
        assert_eq!(sum.len(), 5);
    }

    #[test]
    fn short_input_leaves_trailing_slots_zero() {
        let sum = XorChecksum::of(b"ab");
        assert_eq!(sum.as_bytes(), &[b'a', b'b', 0, 0]);
    }

    #[test]
    fn same_byte_twice_in_one_slot_cancels() {
        let sum = XorChecksum::of(b"abcdabcd");
        assert_eq!(sum.as_bytes(), &[0, 0, 0, 0]);
    }

    #[test]
    fn equality_ignores_cursor() {
        let short = XorChecksum::of(b"xyz");
        let long = XorChecksum::of(b"xyz\0\0\0\0\0");
        assert_ne!(short.len(), long.len());
        assert_eq!(short, long);
    }

    #[test]
    fn accumulate_matches_of() {
        let inputs: [&[u8]; 4] = [b"", b"H", b"Hello, World!", &[0xff; 37]];
        for input in inputs {
            let mut sum = XorChecksum::new();
            for &byte in input {
                sum.accumulate(byte);
            }
            assert_eq!(sum, XorChecksum::of(input));
            assert_eq!(sum.len(), input.len());
        }
    }

    #[test]
    fn const_evaluation() {
        const SUM: XorChecksum = XorChecksum::of(b"abcde");
        assert_eq!(SUM.as_bytes(), &[b'a' ^ b'e', b'b', b'c', b'd']);
    }

    #[test]
    fn display_is_lowercase_hex() {
        let sum = XorChecksum::of(&[0xab, 0x01, 0x00, 0xff]);
        assert_eq!(sum.to_string(), "ab0100ff");
    }
}
