/*!
  Packing and unpacking of instruction fields. Every field is addressed by its offset from the
  most significant bit of the word, so a field of width `W` at offset `at` occupies bits
  `[32 - at - W, 32 - at)`.

  Packing a value that does not fit its field is a programmer error and panics. The assembler
  validates its operands before they get here, so a panic in this module means some internal
  invariant was broken.
*/

use std::fmt::{Display, Formatter};

use super::{Opcode, Word};
use crate::register::{Register, RegisterNumberType};

pub const WORD_BITS: u32 = 32;
pub const OPCODE_BITS: u32 = 7;
pub const REGISTER_BITS: u32 = 5;
pub const FUNCT_BITS: u32 = 3;
pub const IMM12_BITS: u32 = 12;
pub const IMM20_BITS: u32 = 20;

/// A value with a fixed bit width that can be placed anywhere in a word.
pub trait Field: Copy {
  const WIDTH: u32;

  /// The raw bits of the value. Only the low `WIDTH` bits are kept by `pack`.
  fn to_bits(self) -> Word;

  /// Rebuilds the value from exactly `WIDTH` low bits.
  fn from_bits(bits: Word) -> Self;
}

#[inline]
fn mask(width: u32) -> Word {
  match width >= WORD_BITS {
    true  => Word::MAX,
    false => (1 << width) - 1
  }
}

#[inline]
fn shift(at: u32, width: u32) -> u32 {
  assert!(
    at + width <= WORD_BITS,
    "A {}-bit field at offset {} does not fit in a word.", width, at
  );
  WORD_BITS - at - width
}

/// Copies bit `width - 1` of `bits` into every higher bit.
#[inline]
pub fn sign_extend(bits: Word, width: u32) -> i32 {
  let unused = WORD_BITS - width;
  ((bits << unused) as i32) >> unused
}

pub fn pack<T: Field>(into: Word, at: u32, value: T) -> Word {
  into | ((value.to_bits() & mask(T::WIDTH)) << shift(at, T::WIDTH))
}

pub fn unpack<T: Field>(from: Word, at: u32) -> T {
  T::from_bits((from >> shift(at, T::WIDTH)) & mask(T::WIDTH))
}

/// Places the opcode in the top `OPCODE_BITS` of an otherwise empty word.
pub fn pack_opcode(opcode: Opcode) -> Word {
  (opcode.code() as Word) << shift(0, OPCODE_BITS)
}

/// Extracts the opcode, handing back the raw bits if no operation is bound to them.
pub fn unpack_opcode(from: Word) -> Result<Opcode, u8> {
  let raw = ((from >> shift(0, OPCODE_BITS)) & mask(OPCODE_BITS)) as u8;
  Opcode::try_from(raw).map_err(|_| raw)
}

// region Field types

impl Field for Register {
  const WIDTH: u32 = REGISTER_BITS;

  fn to_bits(self) -> Word {
    if (self.idx() as Word) <= mask(REGISTER_BITS) {
      return self.idx() as Word;
    }
    unreachable!("Error: {} cannot be encoded in a {}-bit register field.", self, REGISTER_BITS);
  }

  fn from_bits(bits: Word) -> Register {
    Register::x(bits as RegisterNumberType)
  }
}

/// The secondary selector of the R, I, and S/B shapes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Funct(pub u8);

impl Field for Funct {
  const WIDTH: u32 = FUNCT_BITS;

  fn to_bits(self) -> Word {
    if (self.0 as Word) <= mask(FUNCT_BITS) {
      return self.0 as Word;
    }
    unreachable!("Error: funct {} does not fit in {} bits.", self.0, FUNCT_BITS);
  }

  fn from_bits(bits: Word) -> Funct {
    Funct(bits as u8)
  }
}

impl Display for Funct {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// A signed 12 bit immediate.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Imm12(i16);

impl Imm12 {
  pub const MIN: i64 = -(1 << (IMM12_BITS - 1));
  pub const MAX: i64 = (1 << (IMM12_BITS - 1)) - 1;

  /// Returns `None` if `value` is not representable in 12 signed bits.
  pub fn new(value: i64) -> Option<Imm12> {
    match (Imm12::MIN..=Imm12::MAX).contains(&value) {
      true  => Some(Imm12(value as i16)),
      false => None
    }
  }

  pub fn value(&self) -> i32 {
    self.0 as i32
  }
}

impl Field for Imm12 {
  const WIDTH: u32 = IMM12_BITS;

  fn to_bits(self) -> Word {
    self.value() as Word
  }

  fn from_bits(bits: Word) -> Imm12 {
    Imm12(sign_extend(bits, IMM12_BITS) as i16)
  }
}

impl Display for Imm12 {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// A signed 20 bit immediate.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Imm20(i32);

impl Imm20 {
  pub const MIN: i64 = -(1 << (IMM20_BITS - 1));
  pub const MAX: i64 = (1 << (IMM20_BITS - 1)) - 1;

  /// Returns `None` if `value` is not representable in 20 signed bits.
  pub fn new(value: i64) -> Option<Imm20> {
    match (Imm20::MIN..=Imm20::MAX).contains(&value) {
      true  => Some(Imm20(value as i32)),
      false => None
    }
  }

  pub fn value(&self) -> i32 {
    self.0
  }
}

impl Field for Imm20 {
  const WIDTH: u32 = IMM20_BITS;

  fn to_bits(self) -> Word {
    self.0 as Word
  }

  fn from_bits(bits: Word) -> Imm20 {
    Imm20(sign_extend(bits, IMM20_BITS))
  }
}

impl Display for Imm20 {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

// endregion
