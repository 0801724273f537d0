//! Bit-packed boolean buffer.

/// Growable bit buffer, least significant bit first within each byte.
///
/// Used both as the null bitmap of a column (set bit = null slot) and as the
/// value buffer of boolean columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitmap {
    bits: Vec<u8>,
    len: usize,
    set_count: usize,
}

impl Bitmap {
    /// Create an empty bitmap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bitmap with room for `capacity` bits.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity.div_ceil(8)),
            len: 0,
            set_count: 0,
        }
    }

    /// Append one bit.
    pub fn push(&mut self, set: bool) {
        let bit = self.len % 8;
        if bit == 0 {
            self.bits.push(0);
        }
        if set {
            let last = self.bits.len() - 1;
            self.bits[last] |= 1 << bit;
            self.set_count += 1;
        }
        self.len += 1;
    }

    /// Read the bit at `index`. Out of range reads as unset.
    pub fn get(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.bits[index / 8] & (1 << (index % 8)) != 0
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the bitmap holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of set bits.
    pub fn count_set(&self) -> usize {
        self.set_count
    }

    /// Packed bytes, `len().div_ceil(8)` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut bitmap = Bitmap::new();
        let pattern = [true, false, false, true, true, false, true, false, true, true];
        for bit in pattern {
            bitmap.push(bit);
        }

        assert_eq!(bitmap.len(), 10);
        assert_eq!(bitmap.count_set(), 6);
        for (i, bit) in pattern.iter().enumerate() {
            assert_eq!(bitmap.get(i), *bit, "bit {i}");
        }
        assert_eq!(bitmap.as_bytes(), &[0b0101_1001, 0b0000_0011]);
    }

    #[test]
    fn test_out_of_range_is_unset() {
        let mut bitmap = Bitmap::with_capacity(4);
        bitmap.push(true);
        assert!(bitmap.get(0));
        assert!(!bitmap.get(1));
        assert!(!bitmap.get(100));
    }
}
