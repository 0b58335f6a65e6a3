//! Storage for a single GF(2) equation.
//!
//! Every storage implements [`Equation`]: coefficient lookup, XOR-combination with
//! another row of the same storage, export to bytes and right-hand side lookup.
//! Reads are observably equivalent across storages; combination is only defined
//! between rows of the same storage.

use std::fmt::{self, Display, Formatter};

use crate::common::Gf2Error;

/// Concrete storage of an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// One byte per coefficient.
    Byte,
    /// One offset character code per coefficient.
    Char,
    /// 64 coefficients per `u64`.
    Packed,
}

/// One row `a_0 x_0 + ... + a_{n-1} x_{n-1} = b` over GF(2).
pub trait Equation: Clone + Send + Sync {
    /// Builds a row from its coefficients and right-hand side.
    fn from_coefficients(co: &[bool], rhs: bool) -> Self;

    /// Storage used by this row.
    fn representation(&self) -> Representation;

    /// Number of coefficients.
    fn len(&self) -> usize;

    /// Returns `true` if the row has no coefficients.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coefficient at `index`, or `None` if out of range.
    fn get(&self, index: usize) -> Option<bool>;

    /// Right-hand side.
    fn rhs(&self) -> bool;

    /// Adds `other` to `self` in place, including the right-hand side.
    ///
    /// # Errors
    ///
    /// - If the rows do not have the same number of coefficients.
    fn add(&mut self, other: &Self) -> Result<(), Gf2Error>;

    /// Coefficient at `index`.
    ///
    /// # Errors
    ///
    /// - If `index` is not less than [`Equation::len`].
    fn coefficient(&self, index: usize) -> Result<bool, Gf2Error> {
        self.get(index).ok_or(Gf2Error::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Exports the coefficients as `0`/`1` bytes.
    fn to_bytes(&self) -> Vec<u8> {
        (0..self.len())
            .filter_map(|i| self.get(i))
            .map(u8::from)
            .collect()
    }
}

fn check_len(lhs: usize, rhs: usize) -> Result<(), Gf2Error> {
    if lhs == rhs {
        Ok(())
    } else {
        Err(Gf2Error::LengthMismatch { lhs, rhs })
    }
}

/// Writes `101|1`.
fn fmt_row(row: &impl Equation, f: &mut Formatter<'_>) -> fmt::Result {
    for i in 0..row.len() {
        let bit = row.get(i).unwrap_or_default();
        write!(f, "{}", u8::from(bit))?;
    }
    write!(f, "|{}", u8::from(row.rhs()))
}

/// Equation storing one byte (`0` or `1`) per coefficient.
///
/// Simplest storage, used as the reference for the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteEquation {
    lhs: Vec<u8>,
    rhs: u8,
}

impl Equation for ByteEquation {
    fn from_coefficients(co: &[bool], rhs: bool) -> Self {
        Self {
            lhs: co.iter().copied().map(u8::from).collect(),
            rhs: u8::from(rhs),
        }
    }

    fn representation(&self) -> Representation {
        Representation::Byte
    }

    fn len(&self) -> usize {
        self.lhs.len()
    }

    fn get(&self, index: usize) -> Option<bool> {
        self.lhs.get(index).map(|&b| b & 1 == 1)
    }

    fn rhs(&self) -> bool {
        self.rhs & 1 == 1
    }

    fn add(&mut self, other: &Self) -> Result<(), Gf2Error> {
        check_len(self.len(), other.len())?;
        for (dst, src) in self.lhs.iter_mut().zip(&other.lhs) {
            *dst ^= src;
        }
        self.rhs ^= other.rhs;
        Ok(())
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.lhs.clone()
    }
}

impl Display for ByteEquation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_row(self, f)
    }
}

/// Equation storing each coefficient as a character code offset by [`CharEquation::OFFSET`].
///
/// Meant for inspection rather than speed. A coefficient is the parity of its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharEquation {
    lhs: Vec<u8>,
    rhs: u8,
}

impl CharEquation {
    /// Code of a zero coefficient (`'<'`); `'='` is one.
    pub const OFFSET: u8 = 60;

    /// Raw encoded text, e.g. `"<=<|="`.
    ///
    /// Codes keep growing as rows are combined, so the text drifts away from
    /// `<`/`=` while the parity stays correct.
    #[must_use]
    pub fn encoded(&self) -> String {
        let mut s: String = self.lhs.iter().map(|&c| char::from(c)).collect();
        s.push('|');
        s.push(char::from(self.rhs));
        s
    }
}

impl Equation for CharEquation {
    fn from_coefficients(co: &[bool], rhs: bool) -> Self {
        Self {
            lhs: co.iter().map(|&b| Self::OFFSET + u8::from(b)).collect(),
            rhs: Self::OFFSET + u8::from(rhs),
        }
    }

    fn representation(&self) -> Representation {
        Representation::Char
    }

    fn len(&self) -> usize {
        self.lhs.len()
    }

    fn get(&self, index: usize) -> Option<bool> {
        self.lhs.get(index).map(|&c| c % 2 == 1)
    }

    fn rhs(&self) -> bool {
        self.rhs % 2 == 1
    }

    fn add(&mut self, other: &Self) -> Result<(), Gf2Error> {
        check_len(self.len(), other.len())?;
        // Wrapping keeps the parity as 256 is even
        for (dst, &src) in self.lhs.iter_mut().zip(&other.lhs) {
            *dst = dst.wrapping_add(src % 2);
        }
        self.rhs = self.rhs.wrapping_add(other.rhs % 2);
        Ok(())
    }
}

impl Display for CharEquation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_row(self, f)
    }
}

/// Equation packing 64 coefficients into each `u64`, most significant bit first.
///
/// Coefficient `i` is bit `63 - i % 64` of word `i / 64`.
/// Padding bits of the last word are always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedEquation {
    words: Vec<u64>,
    len: usize,
    rhs: bool,
}

impl PackedEquation {
    const WORD_BITS: usize = u64::BITS as usize;

    /// Word index and shift of coefficient `index`.
    fn locate(index: usize) -> (usize, usize) {
        (
            index / Self::WORD_BITS,
            Self::WORD_BITS - 1 - index % Self::WORD_BITS,
        )
    }
}

impl Equation for PackedEquation {
    fn from_coefficients(co: &[bool], rhs: bool) -> Self {
        let len = co.len();
        let mut words = vec![0; len.div_ceil(Self::WORD_BITS)];
        for (i, &b) in co.iter().enumerate() {
            if b {
                let (w, shift) = Self::locate(i);
                words[w] |= 1 << shift;
            }
        }
        Self { words, len, rhs }
    }

    fn representation(&self) -> Representation {
        Representation::Packed
    }

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        let (w, shift) = Self::locate(index);
        Some((self.words[w] >> shift) & 1 == 1)
    }

    fn rhs(&self) -> bool {
        self.rhs
    }

    fn add(&mut self, other: &Self) -> Result<(), Gf2Error> {
        check_len(self.len, other.len)?;
        for (dst, src) in self.words.iter_mut().zip(&other.words) {
            *dst ^= src;
        }
        self.rhs ^= other.rhs;
        Ok(())
    }
}

impl Display for PackedEquation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_row(self, f)
    }
}

/// Equation whose storage is chosen at runtime.
///
/// Combining two rows of different storages is an error rather than a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyEquation {
    Byte(ByteEquation),
    Char(CharEquation),
    Packed(PackedEquation),
}

impl AnyEquation {
    /// Builds a row with the given storage.
    #[must_use]
    pub fn with_representation(repr: Representation, co: &[bool], rhs: bool) -> Self {
        match repr {
            Representation::Byte => ByteEquation::from_coefficients(co, rhs).into(),
            Representation::Char => CharEquation::from_coefficients(co, rhs).into(),
            Representation::Packed => PackedEquation::from_coefficients(co, rhs).into(),
        }
    }
}

impl From<ByteEquation> for AnyEquation {
    fn from(eq: ByteEquation) -> Self {
        AnyEquation::Byte(eq)
    }
}

impl From<CharEquation> for AnyEquation {
    fn from(eq: CharEquation) -> Self {
        AnyEquation::Char(eq)
    }
}

impl From<PackedEquation> for AnyEquation {
    fn from(eq: PackedEquation) -> Self {
        AnyEquation::Packed(eq)
    }
}

macro_rules! dispatch {
    ($self:expr, $eq:ident => $body:expr) => {
        match $self {
            AnyEquation::Byte($eq) => $body,
            AnyEquation::Char($eq) => $body,
            AnyEquation::Packed($eq) => $body,
        }
    };
}

impl Equation for AnyEquation {
    /// Builds the packed storage. Use [`AnyEquation::with_representation`] for the others.
    fn from_coefficients(co: &[bool], rhs: bool) -> Self {
        PackedEquation::from_coefficients(co, rhs).into()
    }

    fn representation(&self) -> Representation {
        dispatch!(self, eq => eq.representation())
    }

    fn len(&self) -> usize {
        dispatch!(self, eq => eq.len())
    }

    fn get(&self, index: usize) -> Option<bool> {
        dispatch!(self, eq => eq.get(index))
    }

    fn rhs(&self) -> bool {
        dispatch!(self, eq => eq.rhs())
    }

    fn add(&mut self, other: &Self) -> Result<(), Gf2Error> {
        match (self, other) {
            (AnyEquation::Byte(dst), AnyEquation::Byte(src)) => dst.add(src),
            (AnyEquation::Char(dst), AnyEquation::Char(src)) => dst.add(src),
            (AnyEquation::Packed(dst), AnyEquation::Packed(src)) => dst.add(src),
            (dst, src) => Err(Gf2Error::RepresentationMismatch {
                lhs: dst.representation(),
                rhs: src.representation(),
            }),
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        dispatch!(self, eq => eq.to_bytes())
    }
}

impl Display for AnyEquation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_row(self, f)
    }
}
