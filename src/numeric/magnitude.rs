// ============================================================================
// Magnitude
// Word-based unsigned integer backing the exact arithmetic core
// ============================================================================
//
// Crate-internal: arithmetic on Number works on exact magnitudes first and
// rounds once at the end, so this type never tracks precision itself. Words
// are little-endian u64 with u128 intermediates for carries; the vector is
// kept normalized (no high zero words) so equality is structural.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::numeric::bitfield::BitField;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Magnitude {
    words: SmallVec<[u64; 4]>,
}

impl Magnitude {
    pub(crate) fn zero() -> Self {
        Magnitude {
            words: SmallVec::new(),
        }
    }

    pub(crate) fn from_u64(value: u64) -> Self {
        let mut words = SmallVec::new();
        if value != 0 {
            words.push(value);
        }
        Magnitude { words }
    }

    /// True magnitude of a bit field, dropped-bits window included.
    pub(crate) fn from_bitfield(field: &BitField) -> Self {
        let mut magnitude = Magnitude {
            words: field.words().iter().copied().collect(),
        };
        magnitude.normalize();
        magnitude.shl(field.shift_bits())
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of bits up to and including the highest set bit.
    pub(crate) fn bit_length(&self) -> usize {
        match self.words.last() {
            Some(&w) => self.words.len() * 64 - w.leading_zeros() as usize,
            None => 0,
        }
    }

    pub(crate) fn bit(&self, index: usize) -> bool {
        let word = index / 64;
        word < self.words.len() && self.words[word] >> (index % 64) & 1 == 1
    }

    fn set_bit(&mut self, index: usize) {
        let word = index / 64;
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1u64 << (index % 64);
    }

    fn normalize(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }

    pub(crate) fn to_u64(&self) -> Option<u64> {
        match self.words.len() {
            0 => Some(0),
            1 => Some(self.words[0]),
            _ => None,
        }
    }

    pub(crate) fn add(&self, other: &Magnitude) -> Magnitude {
        let mut words: SmallVec<[u64; 4]> = SmallVec::new();
        let mut carry = 0u128;
        for i in 0..self.words.len().max(other.words.len()) {
            let a = self.words.get(i).copied().unwrap_or(0) as u128;
            let b = other.words.get(i).copied().unwrap_or(0) as u128;
            let sum = a + b + carry;
            words.push(sum as u64);
            carry = sum >> 64;
        }
        if carry != 0 {
            words.push(carry as u64);
        }
        let mut result = Magnitude { words };
        result.normalize();
        result
    }

    /// Subtraction; the caller guarantees `self >= other`.
    pub(crate) fn sub(&self, other: &Magnitude) -> Magnitude {
        debug_assert!(self.cmp(other) != Ordering::Less);
        let mut words: SmallVec<[u64; 4]> = SmallVec::new();
        let mut borrow = 0i128;
        for i in 0..self.words.len() {
            let a = self.words[i] as i128;
            let b = other.words.get(i).copied().unwrap_or(0) as i128;
            let mut diff = a - b - borrow;
            if diff < 0 {
                diff += 1i128 << 64;
                borrow = 1;
            } else {
                borrow = 0;
            }
            words.push(diff as u64);
        }
        let mut result = Magnitude { words };
        result.normalize();
        result
    }

    pub(crate) fn cmp(&self, other: &Magnitude) -> Ordering {
        if self.words.len() != other.words.len() {
            return self.words.len().cmp(&other.words.len());
        }
        for i in (0..self.words.len()).rev() {
            match self.words[i].cmp(&other.words[i]) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }

    pub(crate) fn shl(&self, bits: usize) -> Magnitude {
        if self.is_zero() || bits == 0 {
            return self.clone();
        }
        let word_shift = bits / 64;
        let bit_shift = bits % 64;
        let mut words: SmallVec<[u64; 4]> = SmallVec::new();
        words.resize(word_shift, 0);
        if bit_shift == 0 {
            words.extend(self.words.iter().copied());
        } else {
            let mut carry = 0u64;
            for &w in &self.words {
                words.push(w << bit_shift | carry);
                carry = w >> (64 - bit_shift);
            }
            if carry != 0 {
                words.push(carry);
            }
        }
        let mut result = Magnitude { words };
        result.normalize();
        result
    }

    pub(crate) fn shr(&self, bits: usize) -> Magnitude {
        let word_shift = bits / 64;
        if word_shift >= self.words.len() {
            return Magnitude::zero();
        }
        let bit_shift = bits % 64;
        let mut words: SmallVec<[u64; 4]> = SmallVec::new();
        if bit_shift == 0 {
            words.extend(self.words[word_shift..].iter().copied());
        } else {
            let tail = &self.words[word_shift..];
            for i in 0..tail.len() {
                let mut w = tail[i] >> bit_shift;
                if i + 1 < tail.len() {
                    w |= tail[i + 1] << (64 - bit_shift);
                }
                words.push(w);
            }
        }
        let mut result = Magnitude { words };
        result.normalize();
        result
    }

    /// Shift right capturing what the dropped window held: the guard bit
    /// (highest dropped) and a sticky flag for anything below it.
    pub(crate) fn shr_with_round_info(&self, bits: usize) -> (Magnitude, bool, bool) {
        if bits == 0 {
            return (self.clone(), false, false);
        }
        let guard = self.bit(bits - 1);
        let mut sticky = false;
        for position in 0..bits - 1 {
            if self.bit(position) {
                sticky = true;
                break;
            }
        }
        (self.shr(bits), guard, sticky)
    }

    pub(crate) fn mul(&self, other: &Magnitude) -> Magnitude {
        if self.is_zero() || other.is_zero() {
            return Magnitude::zero();
        }
        let mut words: SmallVec<[u64; 4]> = SmallVec::new();
        words.resize(self.words.len() + other.words.len(), 0);
        for (i, &a) in self.words.iter().enumerate() {
            let mut carry = 0u128;
            for (j, &b) in other.words.iter().enumerate() {
                let index = i + j;
                let product = a as u128 * b as u128 + words[index] as u128 + carry;
                words[index] = product as u64;
                carry = product >> 64;
            }
            let mut index = i + other.words.len();
            while carry != 0 {
                let sum = words[index] as u128 + carry;
                words[index] = sum as u64;
                carry = sum >> 64;
                index += 1;
            }
        }
        let mut result = Magnitude { words };
        result.normalize();
        result
    }

    pub(crate) fn mul_u64(&self, factor: u64) -> Magnitude {
        self.mul(&Magnitude::from_u64(factor))
    }

    /// Exact scale by a power of ten, in chunks of 10^19 (the largest power
    /// of ten that fits one word).
    pub(crate) fn mul_pow10(&self, mut exponent: u64) -> Magnitude {
        const CHUNK: u32 = 19;
        const CHUNK_FACTOR: u64 = 10_000_000_000_000_000_000;
        let mut result = self.clone();
        while exponent >= CHUNK as u64 {
            result = result.mul_u64(CHUNK_FACTOR);
            exponent -= CHUNK as u64;
        }
        if exponent > 0 {
            result = result.mul_u64(10u64.pow(exponent as u32));
        }
        result
    }

    /// Binary long division; the caller guarantees a nonzero divisor.
    pub(crate) fn div_rem(&self, divisor: &Magnitude) -> (Magnitude, Magnitude) {
        debug_assert!(!divisor.is_zero());
        if self.cmp(divisor) == Ordering::Less {
            return (Magnitude::zero(), self.clone());
        }
        let shift = self.bit_length() - divisor.bit_length();
        let mut remainder = self.clone();
        let mut quotient = Magnitude::zero();
        let mut shifted = divisor.shl(shift);
        for index in (0..=shift).rev() {
            if remainder.cmp(&shifted) != Ordering::Less {
                remainder = remainder.sub(&shifted);
                quotient.set_bit(index);
            }
            shifted = shifted.shr(1);
        }
        (quotient, remainder)
    }

    pub(crate) fn bit_and(&self, other: &Magnitude) -> Magnitude {
        let mut words: SmallVec<[u64; 4]> = SmallVec::new();
        for i in 0..self.words.len().min(other.words.len()) {
            words.push(self.words[i] & other.words[i]);
        }
        let mut result = Magnitude { words };
        result.normalize();
        result
    }

    pub(crate) fn bit_or(&self, other: &Magnitude) -> Magnitude {
        let mut words: SmallVec<[u64; 4]> = SmallVec::new();
        for i in 0..self.words.len().max(other.words.len()) {
            let a = self.words.get(i).copied().unwrap_or(0);
            let b = other.words.get(i).copied().unwrap_or(0);
            words.push(a | b);
        }
        let mut result = Magnitude { words };
        result.normalize();
        result
    }

    pub(crate) fn bit_xor(&self, other: &Magnitude) -> Magnitude {
        let mut words: SmallVec<[u64; 4]> = SmallVec::new();
        for i in 0..self.words.len().max(other.words.len()) {
            let a = self.words.get(i).copied().unwrap_or(0);
            let b = other.words.get(i).copied().unwrap_or(0);
            words.push(a ^ b);
        }
        let mut result = Magnitude { words };
        result.normalize();
        result
    }
}
