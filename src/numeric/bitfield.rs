// ============================================================================
// BitField
// Growable unsigned bit magnitude with explicit dropped-precision tracking
// ============================================================================

use std::cmp::Ordering;
use std::fmt;

use smallvec::SmallVec;

/// Arbitrary-length unsigned magnitude, bit 0 = least significant retained
/// bit.
///
/// A field stores `significant_bits` bits (reading any index at or beyond
/// that yields `false`) and remembers in `shift_bits` how many low-order
/// bits were dropped by [`decrease_precision`](BitField::decrease_precision);
/// the true magnitude is `stored_bits << shift_bits`. A distinguished empty
/// state means "no value applies here" — it is structurally equal only to
/// another empty field, and orders as zero magnitude.
///
/// Storage is a single little-endian `u64` word vector, inline for values
/// up to 128 bits.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitField {
    words: SmallVec<[u64; 2]>,
    significant_bits: usize,
    shift_bits: usize,
    empty: bool,
}

impl BitField {
    /// An occupied field with no stored bits (magnitude zero).
    pub fn new() -> Self {
        BitField {
            words: SmallVec::new(),
            significant_bits: 0,
            shift_bits: 0,
            empty: false,
        }
    }

    /// The "not applicable" sentinel.
    pub fn empty() -> Self {
        BitField {
            words: SmallVec::new(),
            significant_bits: 0,
            shift_bits: 0,
            empty: true,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Bits actually stored (explicit zeroes included).
    #[inline]
    pub fn significant_bits(&self) -> usize {
        self.significant_bits
    }

    /// Low-order bits dropped by precision reduction.
    #[inline]
    pub fn shift_bits(&self) -> usize {
        self.shift_bits
    }

    /// True when no stored bit is set (also true for an empty field).
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Reads the stored bit at `index`; indexes at or beyond
    /// `significant_bits` read as false.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        if index >= self.significant_bits {
            return false;
        }
        self.words[index / 64] >> (index % 64) & 1 == 1
    }

    /// Reads the bit at a true magnitude position, i.e. with the dropped
    /// low-order window included: positions below `shift_bits` are the
    /// implicit zero padding.
    #[inline]
    pub fn aligned_bit(&self, position: usize) -> bool {
        position >= self.shift_bits && self.get(position - self.shift_bits)
    }

    /// One past the highest true bit position covered by this field.
    #[inline]
    pub fn aligned_len(&self) -> usize {
        self.shift_bits + self.significant_bits
    }

    /// Highest set bit as a true magnitude position.
    pub fn highest_set_bit(&self) -> Option<usize> {
        for index in (0..self.significant_bits).rev() {
            if self.get(index) {
                return Some(index + self.shift_bits);
            }
        }
        None
    }

    /// Stores a one at `index`, growing the field to cover it.
    pub fn set_one(&mut self, index: usize) {
        self.reserve_index(index);
        self.words[index / 64] |= 1u64 << (index % 64);
    }

    /// Stores an explicit zero at `index`, growing the field to cover it.
    pub fn set_zero(&mut self, index: usize) {
        self.reserve_index(index);
        self.words[index / 64] &= !(1u64 << (index % 64));
    }

    /// Stores `bit` at `index`.
    #[inline]
    pub fn set(&mut self, index: usize, bit: bool) {
        if bit {
            self.set_one(index);
        } else {
            self.set_zero(index);
        }
    }

    /// Drops the lowest stored bit and widens the dropped-bits window.
    ///
    /// This is the only way precision leaves a field. On a field with no
    /// stored bits only the window grows; on an empty field this is a no-op.
    pub fn decrease_precision(&mut self) {
        if self.empty {
            return;
        }
        self.shift_bits += 1;
        if self.significant_bits == 0 {
            return;
        }
        // Shift the stored window right by one bit.
        let word_count = self.words.len();
        for i in 0..word_count {
            self.words[i] >>= 1;
            if i + 1 < word_count {
                self.words[i] |= self.words[i + 1] << 63;
            }
        }
        self.significant_bits -= 1;
        self.trim_words();
    }

    /// Magnitude comparison over true bit positions.
    ///
    /// Both operands are aligned at `shift_bits + index`; the scan runs from
    /// the highest covered position of either operand downward, reading
    /// out-of-window bits as zero, and returns at the first differing bit.
    /// Total over any two fields; empty fields compare as zero magnitude.
    pub fn magnitude_cmp(&self, other: &BitField) -> Ordering {
        let top = self.aligned_len().max(other.aligned_len());
        for position in (0..top).rev() {
            let a = self.aligned_bit(position);
            let b = other.aligned_bit(position);
            if a != b {
                return if a { Ordering::Greater } else { Ordering::Less };
            }
        }
        Ordering::Equal
    }

    fn reserve_index(&mut self, index: usize) {
        self.empty = false;
        let needed_words = index / 64 + 1;
        if self.words.len() < needed_words {
            self.words.resize(needed_words, 0);
        }
        if index >= self.significant_bits {
            self.significant_bits = index + 1;
        }
    }

    fn trim_words(&mut self) {
        let needed = (self.significant_bits + 63) / 64;
        self.words.truncate(needed);
        // Keep bits beyond the stored range clear so structural equality
        // stays well defined.
        let word_count = self.words.len();
        if let Some(last) = self.words.last_mut() {
            let used = self.significant_bits - (word_count - 1) * 64;
            if used < 64 {
                *last &= (1u64 << used) - 1;
            }
        }
    }

    /// Raw word view for the arithmetic core (dropped bits not included).
    pub(crate) fn words(&self) -> &[u64] {
        &self.words
    }
}

impl Default for BitField {
    fn default() -> Self {
        BitField::new()
    }
}

impl fmt::Debug for BitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.empty {
            return write!(f, "BitField(Empty)");
        }
        let mut bits = String::with_capacity(self.significant_bits);
        for index in (0..self.significant_bits).rev() {
            bits.push(if self.get(index) { '1' } else { '0' });
        }
        write!(f, "BitField(0b{}, shift={})", bits, self.shift_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn from_value(mut value: u64) -> BitField {
        let mut field = BitField::new();
        let mut index = 0;
        while value != 0 {
            field.set(index, value & 1 == 1);
            value >>= 1;
            index += 1;
        }
        field
    }

    #[test]
    fn test_set_get_growth() {
        let mut field = BitField::new();
        assert_eq!(field.significant_bits(), 0);
        field.set_one(3);
        assert_eq!(field.significant_bits(), 4);
        assert!(field.get(3));
        assert!(!field.get(0));
        assert!(!field.get(2));
        // Out-of-window reads are false, never a panic.
        assert!(!field.get(100));
    }

    #[test]
    fn test_set_zero_stores_explicit_bits() {
        let mut field = BitField::new();
        field.set_zero(5);
        assert_eq!(field.significant_bits(), 6);
        assert!(field.is_zero());
        assert!(!field.is_empty());
    }

    #[test]
    fn test_growth_across_words() {
        let mut field = BitField::new();
        field.set_one(0);
        field.set_one(64);
        field.set_one(127);
        assert_eq!(field.significant_bits(), 128);
        assert!(field.get(0));
        assert!(field.get(64));
        assert!(field.get(127));
        assert!(!field.get(63));
        assert_eq!(field.highest_set_bit(), Some(127));
    }

    #[test]
    fn test_decrease_precision_single_step() {
        // 0b1011 = 11; dropping the low bit leaves 0b101 shifted once = 10.
        let mut field = from_value(0b1011);
        field.decrease_precision();
        assert_eq!(field.significant_bits(), 3);
        assert_eq!(field.shift_bits(), 1);
        assert!(field.get(0)); // old bit 1
        assert!(!field.get(1)); // old bit 2
        assert!(field.get(2)); // old bit 3
        assert_eq!(field.magnitude_cmp(&from_value(10)), Ordering::Equal);
    }

    #[test]
    fn test_decrease_precision_n_times() {
        let n = 5;
        let mut field = from_value(0b1111_1111);
        let before_significant = field.significant_bits();
        for _ in 0..n {
            field.decrease_precision();
        }
        assert_eq!(field.significant_bits(), before_significant - n);
        assert_eq!(field.shift_bits(), n);
        // Dropped positions read as false through the aligned view.
        for position in 0..n {
            assert!(!field.aligned_bit(position));
        }
        for position in n..field.aligned_len() {
            assert!(field.aligned_bit(position));
        }
    }

    #[test]
    fn test_magnitude_ordering() {
        let pairs = [(0u64, 1u64), (1, 2), (7, 8), (255, 256), (999, 1000)];
        for (small, large) in pairs {
            assert_eq!(
                from_value(small).magnitude_cmp(&from_value(large)),
                Ordering::Less
            );
            assert_eq!(
                from_value(large).magnitude_cmp(&from_value(small)),
                Ordering::Greater
            );
            assert_eq!(
                from_value(large).magnitude_cmp(&from_value(large)),
                Ordering::Equal
            );
        }
    }

    #[test]
    fn test_magnitude_cmp_respects_shift_padding() {
        // 0b1 shifted three times represents 8, which beats 0b111 = 7.
        let mut shifted = from_value(0b1000);
        for _ in 0..3 {
            shifted.decrease_precision();
        }
        assert_eq!(shifted.significant_bits(), 1);
        assert_eq!(shifted.shift_bits(), 3);
        assert_eq!(
            shifted.magnitude_cmp(&from_value(0b111)),
            Ordering::Greater
        );
        assert_eq!(shifted.magnitude_cmp(&from_value(8)), Ordering::Equal);
        assert_eq!(shifted.magnitude_cmp(&from_value(9)), Ordering::Less);
    }

    #[test]
    fn test_empty_semantics() {
        let empty = BitField::empty();
        assert!(empty.is_empty());
        assert_eq!(empty, BitField::empty());
        // Structurally distinct from an occupied zero-magnitude field.
        assert_ne!(empty, BitField::new());
        let mut grown = BitField::new();
        grown.set_zero(0);
        assert_ne!(empty, grown);
        // But it orders as zero magnitude.
        assert_eq!(empty.magnitude_cmp(&BitField::new()), Ordering::Equal);
        assert_eq!(empty.magnitude_cmp(&from_value(1)), Ordering::Less);
    }

    #[test]
    fn test_structural_equality_and_hash() {
        let a = from_value(42);
        let b = from_value(42);
        assert_eq!(a, b);
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&from_value(43)));
    }

    #[test]
    fn test_debug_format() {
        let field = from_value(0b101);
        assert_eq!(format!("{:?}", field), "BitField(0b101, shift=0)");
        assert_eq!(format!("{:?}", BitField::empty()), "BitField(Empty)");
    }
}
