/*!
  This module is responsible for the encoding and decoding of binary instructions, one
  builder and one inverse per instruction shape. See the `bytecode` module documentation for
  the layouts.

  Builders start from the packed opcode and OR each field in at its offset. They check that the
  opcode belongs to their shape; handing `encode_r` a `Jal` is a bug in the caller.
*/

use super::fields::{pack, pack_opcode, unpack, unpack_opcode, Funct, Imm12, Imm20};
use super::{DecodeError, Opcode, Shape, Word};
use crate::register::Register;

// Field offsets, counted from the most significant bit. If you change these you must also
// change the layout table in the `bytecode` module documentation.
const OPCODE_AT: u32 = 0;
const FIRST_AT: u32 = 7;
const SECOND_AT: u32 = 12;
const THIRD_AT: u32 = 17;
const R_FUNCT_AT: u32 = 22;
const I_FUNCT_AT: u32 = 29;
const IMM20_AT: u32 = 12;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RShape {
  pub opcode: Opcode,
  pub rd: Register,
  pub rs1: Register,
  pub rs2: Register,
  pub funct: Funct
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IShape {
  pub opcode: Opcode,
  pub rd: Register,
  pub rs1: Register,
  pub imm: Imm12,
  pub funct: Funct
}

/// Stores use `rs1` as the base register and `rs2` as the value; branches compare the two.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SBShape {
  pub opcode: Opcode,
  pub rs1: Register,
  pub rs2: Register,
  pub imm: Imm12,
  pub funct: Funct
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct UJShape {
  pub opcode: Opcode,
  pub rd: Register,
  pub imm: Imm20
}

/// `put` and `get` address memory at `base + offset`, both registers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LegacyShape {
  pub opcode: Opcode,
  pub value: Register,
  pub base: Register,
  pub offset: Register
}

/// Panics if `opcode` is not laid out as `shape`.
fn require_shape(opcode: Opcode, shape: Shape) {
  if opcode.shape() == shape {
    return;
  }
  unreachable!(
    "Error: opcode `{}` has the {} shape but was encoded as {}.", opcode, opcode.shape(), shape
  );
}

#[inline]
fn decode_opcode(word: Word) -> Result<Opcode, DecodeError> {
  unpack_opcode(word).map_err(DecodeError::UnknownOpcode)
}

// region Encoders

pub fn encode_halt() -> Word {
  pack_opcode(Opcode::Hlt)
}

/// [Op:7][Rd:5][Rs1:5][Rs2:5][Funct:3][Reserved:7]
pub fn encode_r(opcode: Opcode, rd: Register, rs1: Register, rs2: Register, funct: Funct) -> Word {
  require_shape(opcode, Shape::R);
  let word = pack_opcode(opcode);
  let word = pack(word, FIRST_AT, rd);
  let word = pack(word, SECOND_AT, rs1);
  let word = pack(word, THIRD_AT, rs2);
  pack(word, R_FUNCT_AT, funct)
}

/// [Op:7][Rd:5][Rs1:5][Imm:12][Funct:3]
pub fn encode_i(opcode: Opcode, rd: Register, rs1: Register, imm: Imm12, funct: Funct) -> Word {
  require_shape(opcode, Shape::I);
  let word = pack_opcode(opcode);
  let word = pack(word, FIRST_AT, rd);
  let word = pack(word, SECOND_AT, rs1);
  let word = pack(word, THIRD_AT, imm);
  pack(word, I_FUNCT_AT, funct)
}

/// [Op:7][Rs1:5][Rs2:5][Imm:12][Funct:3]
pub fn encode_sb(opcode: Opcode, rs1: Register, rs2: Register, imm: Imm12, funct: Funct) -> Word {
  require_shape(opcode, Shape::SB);
  let word = pack_opcode(opcode);
  let word = pack(word, FIRST_AT, rs1);
  let word = pack(word, SECOND_AT, rs2);
  let word = pack(word, THIRD_AT, imm);
  pack(word, I_FUNCT_AT, funct)
}

/// [Op:7][Rd:5][Imm:20]
pub fn encode_uj(opcode: Opcode, rd: Register, imm: Imm20) -> Word {
  require_shape(opcode, Shape::UJ);
  let word = pack_opcode(opcode);
  let word = pack(word, FIRST_AT, rd);
  pack(word, IMM20_AT, imm)
}

/// [Op:7][Value:5][Base:5][Offset:5][Reserved:10]
pub fn encode_legacy(opcode: Opcode, value: Register, base: Register, offset: Register) -> Word {
  require_shape(opcode, Shape::Legacy);
  let word = pack_opcode(opcode);
  let word = pack(word, FIRST_AT, value);
  let word = pack(word, SECOND_AT, base);
  pack(word, THIRD_AT, offset)
}

// endregion

// region Decoders

pub fn decode_r(word: Word) -> Result<RShape, DecodeError> {
  Ok(RShape {
    opcode: decode_opcode(word)?,
    rd: unpack(word, FIRST_AT),
    rs1: unpack(word, SECOND_AT),
    rs2: unpack(word, THIRD_AT),
    funct: unpack(word, R_FUNCT_AT),
  })
}

pub fn decode_i(word: Word) -> Result<IShape, DecodeError> {
  Ok(IShape {
    opcode: decode_opcode(word)?,
    rd: unpack(word, FIRST_AT),
    rs1: unpack(word, SECOND_AT),
    imm: unpack(word, THIRD_AT),
    funct: unpack(word, I_FUNCT_AT),
  })
}

pub fn decode_sb(word: Word) -> Result<SBShape, DecodeError> {
  Ok(SBShape {
    opcode: decode_opcode(word)?,
    rs1: unpack(word, FIRST_AT),
    rs2: unpack(word, SECOND_AT),
    imm: unpack(word, THIRD_AT),
    funct: unpack(word, I_FUNCT_AT),
  })
}

pub fn decode_uj(word: Word) -> Result<UJShape, DecodeError> {
  Ok(UJShape {
    opcode: decode_opcode(word)?,
    rd: unpack(word, FIRST_AT),
    imm: unpack(word, IMM20_AT),
  })
}

pub fn decode_legacy(word: Word) -> Result<LegacyShape, DecodeError> {
  Ok(LegacyShape {
    opcode: decode_opcode(word)?,
    value: unpack(word, FIRST_AT),
    base: unpack(word, SECOND_AT),
    offset: unpack(word, THIRD_AT),
  })
}

// endregion
