use std::fmt::{Display, Formatter};

use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum_macros::{Display as StrumDisplay, IntoStaticStr};
use thiserror::Error;

use super::binary::*;
use super::fields::{unpack_opcode, Funct, Imm12, Imm20, OPCODE_BITS};
use super::Word;
use crate::register::Register;

/**
  Opcodes of the machine.

  The discriminants are the encoded values, so the order the opcodes are listed below is
  significant. Each opcode has exactly one shape, given by `Opcode::shape()`. `Op`, `Imm`, and
  `Branch` multiplex sibling operations through the funct field.
*/
#[derive(
StrumDisplay, IntoStaticStr, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,  Debug,            Hash
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Opcode {
  Hlt,     // hlt
  // Legacy register-indirect memory access //
  Put,     // put value base offset
  Get,     // get value base offset
  // R shape //
  Op,      // add
  Mlt,     // mlt
  // I shape //
  Imm,     // addi, slti
  // S/B shape //
  Branch,  // bne
  // U/J shape //
  Jal,     // jal
  Lui,     // lui
  // Memory //
  Lw,      // lw (I shape)
  Sw,      // sw (S shape)
}

/// The first opcode value with no operation bound to it. It and everything above it are never
/// dispatched.
pub const OPCODE_SENTINEL: u8 = Opcode::Sw as u8 + 1;

const _: () = assert!((OPCODE_SENTINEL as u32) < (1 << OPCODE_BITS));

/// Field layout of an instruction.
#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Shape {
  Halt,
  R,
  I,
  #[strum(serialize = "S/B")]
  SB,
  #[strum(serialize = "U/J")]
  UJ,
  Legacy,
}

impl Opcode {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  pub fn shape(&self) -> Shape {
    match self {
      Opcode::Hlt                    => Shape::Halt,
      Opcode::Put    | Opcode::Get   => Shape::Legacy,
      Opcode::Op     | Opcode::Mlt   => Shape::R,
      Opcode::Imm    | Opcode::Lw    => Shape::I,
      Opcode::Branch | Opcode::Sw    => Shape::SB,
      Opcode::Jal    | Opcode::Lui   => Shape::UJ,
    }
  }
}

// region Funct selectors

/// Operations under `Opcode::Op`.
#[derive(
StrumDisplay, TryFromPrimitive, IntoPrimitive, Clone, Copy, Eq, PartialEq, Debug, Hash
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum OpFunct {
  Add = 0,
}

/// Operations under `Opcode::Imm`.
#[derive(
StrumDisplay, TryFromPrimitive, IntoPrimitive, Clone, Copy, Eq, PartialEq, Debug, Hash
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum ImmFunct {
  Addi = 0,
  Slti = 1,
}

/// Operations under `Opcode::Branch`.
#[derive(
StrumDisplay, TryFromPrimitive, IntoPrimitive, Clone, Copy, Eq, PartialEq, Debug, Hash
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum BranchFunct {
  Bne = 0,
}

impl From<OpFunct> for Funct {
  fn from(funct: OpFunct) -> Funct {
    Funct(funct.into())
  }
}

impl From<ImmFunct> for Funct {
  fn from(funct: ImmFunct) -> Funct {
    Funct(funct.into())
  }
}

impl From<BranchFunct> for Funct {
  fn from(funct: BranchFunct) -> Funct {
    Funct(funct.into())
  }
}

// endregion

#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
  #[error("no operation is bound to opcode {0}")]
  UnknownOpcode(u8),

  #[error("no operation is bound to funct {funct} of opcode `{opcode}`")]
  UnboundFunct {
    opcode: Opcode,
    funct: u8
  },
}

/// Holds the unencoded components of an instruction, one variant per operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  /// [Op:7][Reserved:25]
  Halt,
  /// [Op:7][Value:5][Base:5][Offset:5][Reserved:10]
  Put { value: Register, base: Register, offset: Register },
  Get { value: Register, base: Register, offset: Register },
  /// [Op:7][Rd:5][Rs1:5][Rs2:5][Funct:3][Reserved:7]
  Add { rd: Register, rs1: Register, rs2: Register },
  Mlt { rd: Register, rs1: Register, rs2: Register },
  /// [Op:7][Rd:5][Rs1:5][Imm:12][Funct:3]
  Addi { rd: Register, rs1: Register, imm: Imm12 },
  Slti { rd: Register, rs1: Register, imm: Imm12 },
  Lw { rd: Register, base: Register, offset: Imm12 },
  /// [Op:7][Rs1:5][Rs2:5][Imm:12][Funct:3]
  Sw { base: Register, offset: Imm12, value: Register },
  Bne { rs1: Register, rs2: Register, offset: Imm12 },
  /// [Op:7][Rd:5][Imm:20]
  Jal { rd: Register, offset: Imm20 },
  Lui { rd: Register, imm: Imm20 },
}

impl Instruction {

  pub fn opcode(&self) -> Opcode {
    match self {
      Instruction::Halt                               => Opcode::Hlt,
      Instruction::Put { .. }                         => Opcode::Put,
      Instruction::Get { .. }                         => Opcode::Get,
      Instruction::Add { .. }                         => Opcode::Op,
      Instruction::Mlt { .. }                         => Opcode::Mlt,
      Instruction::Addi { .. } | Instruction::Slti { .. } => Opcode::Imm,
      Instruction::Lw { .. }                          => Opcode::Lw,
      Instruction::Sw { .. }                          => Opcode::Sw,
      Instruction::Bne { .. }                         => Opcode::Branch,
      Instruction::Jal { .. }                         => Opcode::Jal,
      Instruction::Lui { .. }                         => Opcode::Lui,
    }
  }

  pub fn encode(&self) -> Word {
    let opcode = self.opcode();
    match *self {

      Instruction::Halt => encode_halt(),

      | Instruction::Put { value, base, offset }
      | Instruction::Get { value, base, offset } => encode_legacy(opcode, value, base, offset),

      Instruction::Add { rd, rs1, rs2 } => encode_r(opcode, rd, rs1, rs2, OpFunct::Add.into()),
      Instruction::Mlt { rd, rs1, rs2 } => encode_r(opcode, rd, rs1, rs2, Funct(0)),

      Instruction::Addi { rd, rs1, imm } => encode_i(opcode, rd, rs1, imm, ImmFunct::Addi.into()),
      Instruction::Slti { rd, rs1, imm } => encode_i(opcode, rd, rs1, imm, ImmFunct::Slti.into()),
      Instruction::Lw { rd, base, offset } => encode_i(opcode, rd, base, offset, Funct(0)),

      Instruction::Sw { base, offset, value } => encode_sb(opcode, base, value, offset, Funct(0)),
      Instruction::Bne { rs1, rs2, offset } => {
        encode_sb(opcode, rs1, rs2, offset, BranchFunct::Bne.into())
      }

      | Instruction::Jal { rd, offset: imm }
      | Instruction::Lui { rd, imm } => encode_uj(opcode, rd, imm),

    }
  }

  /// Decodes a word completely, funct included. Unlike the machine, which can be told to treat
  /// an unbound funct as a no-op, this always rejects it, because there is nothing to name.
  pub fn decode(word: Word) -> Result<Instruction, DecodeError> {
    let opcode = unpack_opcode(word).map_err(DecodeError::UnknownOpcode)?;
    let unbound = |funct: Funct| DecodeError::UnboundFunct { opcode, funct: funct.0 };

    let instruction =
      match opcode {

        Opcode::Hlt => Instruction::Halt,

        Opcode::Put | Opcode::Get => {
          let LegacyShape { value, base, offset, .. } = decode_legacy(word)?;
          match opcode {
            Opcode::Put => Instruction::Put { value, base, offset },
            _           => Instruction::Get { value, base, offset },
          }
        }

        Opcode::Op => {
          let RShape { rd, rs1, rs2, funct, .. } = decode_r(word)?;
          match OpFunct::try_from(funct.0).map_err(|_| unbound(funct))? {
            OpFunct::Add => Instruction::Add { rd, rs1, rs2 },
          }
        }

        Opcode::Mlt => {
          let RShape { rd, rs1, rs2, .. } = decode_r(word)?;
          Instruction::Mlt { rd, rs1, rs2 }
        }

        Opcode::Imm => {
          let IShape { rd, rs1, imm, funct, .. } = decode_i(word)?;
          match ImmFunct::try_from(funct.0).map_err(|_| unbound(funct))? {
            ImmFunct::Addi => Instruction::Addi { rd, rs1, imm },
            ImmFunct::Slti => Instruction::Slti { rd, rs1, imm },
          }
        }

        Opcode::Lw => {
          let IShape { rd, rs1, imm, .. } = decode_i(word)?;
          Instruction::Lw { rd, base: rs1, offset: imm }
        }

        Opcode::Sw => {
          let SBShape { rs1, rs2, imm, .. } = decode_sb(word)?;
          Instruction::Sw { base: rs1, offset: imm, value: rs2 }
        }

        Opcode::Branch => {
          let SBShape { rs1, rs2, imm, funct, .. } = decode_sb(word)?;
          match BranchFunct::try_from(funct.0).map_err(|_| unbound(funct))? {
            BranchFunct::Bne => Instruction::Bne { rs1, rs2, offset: imm },
          }
        }

        Opcode::Jal => {
          let UJShape { rd, imm, .. } = decode_uj(word)?;
          Instruction::Jal { rd, offset: imm }
        }

        Opcode::Lui => {
          let UJShape { rd, imm, .. } = decode_uj(word)?;
          Instruction::Lui { rd, imm }
        }

      }; // end match opcode

    Ok(instruction)
  }
}

/// Prints the instruction as assembly that `assemble` accepts.
impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      Instruction::Halt => write!(f, "hlt"),

      Instruction::Put { value, base, offset } => write!(f, "put {} {} {}", value, base, offset),
      Instruction::Get { value, base, offset } => write!(f, "get {} {} {}", value, base, offset),

      Instruction::Add { rd, rs1, rs2 } => write!(f, "add {} {} {}", rd, rs1, rs2),
      Instruction::Mlt { rd, rs1, rs2 } => write!(f, "mlt {} {} {}", rd, rs1, rs2),

      Instruction::Addi { rd, rs1, imm } => write!(f, "addi {} {} {}", rd, rs1, imm),
      Instruction::Slti { rd, rs1, imm } => write!(f, "slti {} {} {}", rd, rs1, imm),
      Instruction::Lw { rd, base, offset } => write!(f, "lw {} {} {}", rd, base, offset),

      Instruction::Sw { base, offset, value } => write!(f, "sw {} {} {}", base, offset, value),
      Instruction::Bne { rs1, rs2, offset } => write!(f, "bne {} {} {}", rs1, rs2, offset),

      Instruction::Jal { rd, offset } => write!(f, "jal {} {}", rd, offset),
      Instruction::Lui { rd, imm } => write!(f, "lui {} {}", rd, imm),

    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::bytecode::{pack, pack_opcode, WORD_BITS};

  fn x(idx: u8) -> Register {
    Register::x(idx)
  }

  fn samples() -> Vec<Instruction> {
    let imm12 = |v| Imm12::new(v).unwrap();
    let imm20 = |v| Imm20::new(v).unwrap();
    vec![
      Instruction::Halt,
      Instruction::Put { value: x(8), base: x(0), offset: x(7) },
      Instruction::Get { value: x(31), base: x(1), offset: x(2) },
      Instruction::Add { rd: x(8), rs1: x(8), rs2: x(2) },
      Instruction::Mlt { rd: x(8), rs1: x(1), rs2: x(2) },
      Instruction::Addi { rd: x(1), rs1: x(1), imm: imm12(-1) },
      Instruction::Slti { rd: x(3), rs1: x(1), imm: imm12(Imm12::MAX) },
      Instruction::Lw { rd: x(4), base: x(5), offset: imm12(Imm12::MIN) },
      Instruction::Sw { base: x(7), offset: imm12(0), value: x(8) },
      Instruction::Bne { rs1: x(3), rs2: x(0), offset: imm12(12) },
      Instruction::Jal { rd: x(1), offset: imm20(Imm20::MIN) },
      Instruction::Lui { rd: x(31), imm: imm20(Imm20::MAX) },
    ]
  }

  #[test]
  fn decode_inverts_encode(){
    for instruction in samples() {
      assert_eq!(Instruction::decode(instruction.encode()), Ok(instruction), "{}", instruction);
    }
  }

  #[test]
  fn opcode_occupies_top_bits(){
    for instruction in samples() {
      let word = instruction.encode();
      assert_eq!(word >> (WORD_BITS - OPCODE_BITS), instruction.opcode().code() as Word);
    }
  }

  #[test]
  fn opcode_shapes(){
    assert_eq!(Opcode::Hlt.shape(), Shape::Halt);
    assert_eq!(Opcode::Put.shape(), Shape::Legacy);
    assert_eq!(Opcode::Op.shape(), Shape::R);
    assert_eq!(Opcode::Lw.shape(), Shape::I);
    assert_eq!(Opcode::Sw.shape(), Shape::SB);
    assert_eq!(Opcode::Lui.shape(), Shape::UJ);
    assert_eq!(Shape::SB.to_string(), "S/B");
  }

  #[test]
  fn halt_is_the_zero_word(){
    assert_eq!(Instruction::Halt.encode(), 0);
    assert_eq!(Opcode::Hlt.to_string(), "hlt");
  }

  #[test]
  fn unknown_opcode(){
    let word = (OPCODE_SENTINEL as Word) << (WORD_BITS - OPCODE_BITS);
    assert_eq!(Instruction::decode(word), Err(DecodeError::UnknownOpcode(OPCODE_SENTINEL)));
  }

  #[test]
  fn unbound_funct(){
    let word = pack(pack_opcode(Opcode::Imm), 29, Funct(6));
    assert_eq!(
      Instruction::decode(word),
      Err(DecodeError::UnboundFunct { opcode: Opcode::Imm, funct: 6 })
    );
  }

  #[test]
  fn display_as_assembly(){
    let text: Vec<String> = samples().iter().map(Instruction::to_string).collect();
    assert_eq!(
      text,
      vec![
        "hlt",
        "put x8 x0 x7",
        "get x31 x1 x2",
        "add x8 x8 x2",
        "mlt x8 x1 x2",
        "addi x1 x1 -1",
        "slti x3 x1 2047",
        "lw x4 x5 -2048",
        "sw x7 0 x8",
        "bne x3 x0 12",
        "jal x1 -524288",
        "lui x31 524287",
      ]
    );
  }
}
