//! Width-tagged bit-vector, tuple, and array values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Number of bits stored per `u64` storage word.
const BITS_PER_WORD: u32 = 64;

/// Returns the number of `u64` words needed to hold `width` bits.
pub(crate) fn word_count(width: u32) -> usize {
    width.div_ceil(BITS_PER_WORD) as usize
}

/// A fixed-width bit vector with an advisory signedness tag.
///
/// Bits are stored little-endian, 64 per word, with unused high bits of the
/// top word kept at zero. The `signed` tag records how the producing stage
/// interpreted the value; it is deliberately excluded from equality and
/// hashing because the stages being cross-checked disagree on it while
/// producing identical bit patterns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bits {
    width: u32,
    words: Vec<u64>,
    signed: bool,
}

impl Bits {
    /// Creates an unsigned-tagged bit vector from a `u64`.
    ///
    /// Bits beyond the given width are ignored.
    pub fn from_u64(width: u32, value: u64) -> Self {
        let mut words = vec![0; word_count(width)];
        if width > 0 {
            words[0] = value;
        }
        let mut bits = Self {
            width,
            words,
            signed: false,
        };
        bits.mask_top_word();
        bits
    }

    /// Creates a signed-tagged bit vector from an `i64`, truncated to `width`
    /// bits of two's complement.
    pub fn from_i64(width: u32, value: i64) -> Self {
        let mut words = vec![value as u64; word_count(width)];
        // Sign-extend into the upper words.
        let fill = if value < 0 { u64::MAX } else { 0 };
        for word in words.iter_mut().skip(1) {
            *word = fill;
        }
        let mut bits = Self {
            width,
            words,
            signed: true,
        };
        bits.mask_top_word();
        bits
    }

    /// Creates a bit vector from raw little-endian words.
    ///
    /// `words` must contain exactly the number of words `width` requires;
    /// bits beyond the width in the top word are cleared.
    ///
    /// # Panics
    ///
    /// Panics if `words.len()` does not match the required word count.
    pub fn from_words(width: u32, words: Vec<u64>) -> Self {
        assert_eq!(
            words.len(),
            word_count(width),
            "word count {} does not match width {width}",
            words.len()
        );
        let mut bits = Self {
            width,
            words,
            signed: false,
        };
        bits.mask_top_word();
        bits
    }

    /// Returns a copy of this value carrying the given signedness tag.
    pub fn with_signed_tag(mut self, signed: bool) -> Self {
        self.signed = signed;
        self
    }

    /// Returns the width in bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns whether this value carries a signed interpretation tag.
    pub fn is_signed_tagged(&self) -> bool {
        self.signed
    }

    /// Returns the little-endian storage words.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Converts to a `u64` if the width is at most 64 bits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.width > 64 {
            return None;
        }
        Some(self.words.first().copied().unwrap_or(0))
    }

    /// Clears bits beyond `width` in the top storage word.
    fn mask_top_word(&mut self) {
        if self.width == 0 {
            self.words.clear();
            return;
        }
        let rem = self.width % BITS_PER_WORD;
        if rem != 0 {
            if let Some(top) = self.words.last_mut() {
                *top &= (1u64 << rem) - 1;
            }
        }
    }

    /// Renders the payload as a minimal lowercase hex string.
    fn hex_digits(&self) -> String {
        let mut digits = String::new();
        for (i, word) in self.words.iter().enumerate().rev() {
            if digits.is_empty() {
                if *word == 0 && i != 0 {
                    continue;
                }
                digits.push_str(&format!("{word:x}"));
            } else {
                digits.push_str(&format!("{word:016x}"));
            }
        }
        if digits.is_empty() {
            digits.push('0');
        }
        digits
    }
}

impl PartialEq for Bits {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.words == other.words
    }
}

impl Eq for Bits {}

impl Hash for Bits {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.words.hash(state);
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bits[{}]:0x{}", self.width, self.hex_digits())
    }
}

/// A typed datum produced or consumed by an evaluation stage.
///
/// Values are either scalar bit vectors, tuples of values, or homogeneous
/// arrays of values. Equality recurses structurally and uses the
/// sign-agnostic [`Bits`] equality at the leaves.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// A scalar bit vector.
    Bits(Bits),
    /// An ordered, possibly heterogeneous collection of values.
    Tuple(Vec<Value>),
    /// An ordered collection of same-typed values.
    Array(Vec<Value>),
}

impl Value {
    /// Creates an unsigned-tagged scalar value.
    pub fn ubits(width: u32, value: u64) -> Self {
        Self::Bits(Bits::from_u64(width, value))
    }

    /// Creates a signed-tagged scalar value.
    pub fn sbits(width: u32, value: i64) -> Self {
        Self::Bits(Bits::from_i64(width, value))
    }

    /// Creates a tuple value.
    pub fn tuple(elements: Vec<Value>) -> Self {
        Self::Tuple(elements)
    }

    /// Creates an array value.
    pub fn array(elements: Vec<Value>) -> Self {
        Self::Array(elements)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bits(bits) => write!(f, "{bits}"),
            Value::Tuple(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, ")")
            }
            Value::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
        }
    }
}
