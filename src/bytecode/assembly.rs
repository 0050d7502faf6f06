/*!
  The human readable textual form of bytecode is called assembly. This module leverages the
  `strum` derives of `Mnemonic` to map mnemonic text onto operations and `nom` to split each
  line into tokens.

  Source is one instruction per line: a mnemonic followed by its operands, separated by
  whitespace or commas. Registers are written `x0` through `x31`; immediates are signed decimal
  numbers. A `#` starts a comment that runs to the end of the line. There are no labels: jump and
  branch offsets are literal byte distances, and remember that the program counter still advances
  by one instruction after a jump or branch is taken.

  Assembly is all-or-nothing. The first bad line is reported and no words are returned.
*/

use std::str::FromStr;

use nom::{
  branch::alt,
  bytes::complete::is_not,
  character::complete::{char as one_char, digit1, one_of, space0, space1},
  combinator::{all_consuming, opt, recognize, rest},
  multi::many0,
  sequence::{delimited, pair, preceded, tuple},
  IResult,
};
use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};
use thiserror::Error;
use tracing::{debug, trace};

use super::fields::{Imm12, Imm20, IMM12_BITS, IMM20_BITS};
use super::{Instruction, Word};
use crate::register::{Register, GENERAL_REGISTER_COUNT};

/// Operations as they are spelled in assembly. `set` and `nop` are conveniences that assemble
/// to `addi`.
#[derive(
StrumDisplay, EnumString, IntoStaticStr,
Clone,        Copy,       Eq, PartialEq, Debug, Hash
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mnemonic {
  #[strum(to_string = "hlt", serialize = "halt")]
  Hlt,   // hlt
  Put,   // put  xV xB xO
  Get,   // get  xV xB xO
  Add,   // add  xD xS1 xS2
  Mlt,   // mlt  xD xS1 xS2
  Addi,  // addi xD xS1 imm12
  Slti,  // slti xD xS1 imm12
  Lw,    // lw   xD xB imm12
  Sw,    // sw   xB imm12 xV
  Bne,   // bne  xS1 xS2 imm12
  Jal,   // jal  xD imm20
  Lui,   // lui  xD imm20
  Set,   // set  xD imm12      => addi xD x0 imm12
  Nop,   // nop                => addi x0 x0 0
}

/// What an operand token must look like.
#[derive(StrumDisplay, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum OperandKind {
  #[strum(serialize = "register")]
  Register,
  #[strum(serialize = "12-bit immediate")]
  Imm12,
  #[strum(serialize = "20-bit immediate")]
  Imm20,
}

impl Mnemonic {

  /// The operands the mnemonic expects, in source order.
  pub fn operands(&self) -> &'static [OperandKind] {
    use OperandKind as K;
    match self {
      Mnemonic::Hlt | Mnemonic::Nop      => &[],
      | Mnemonic::Put
      | Mnemonic::Get
      | Mnemonic::Add
      | Mnemonic::Mlt                    => &[K::Register, K::Register, K::Register],
      | Mnemonic::Addi
      | Mnemonic::Slti
      | Mnemonic::Lw
      | Mnemonic::Bne                    => &[K::Register, K::Register, K::Imm12],
      Mnemonic::Sw                       => &[K::Register, K::Imm12, K::Register],
      Mnemonic::Jal | Mnemonic::Lui      => &[K::Register, K::Imm20],
      Mnemonic::Set                      => &[K::Register, K::Imm12],
    }
  }

  /// Builds the instruction from operands already checked against `operands()`.
  fn build(&self, operands: &[Operand]) -> Instruction {
    use Operand::{Imm12 as I, Imm20 as U, Register as R};
    match (self, operands) {

      (Mnemonic::Hlt, []) => Instruction::Halt,
      (Mnemonic::Nop, []) => {
        Instruction::Addi { rd: Register::ZERO, rs1: Register::ZERO, imm: Default::default() }
      }

      (Mnemonic::Put, &[R(value), R(base), R(offset)]) => Instruction::Put { value, base, offset },
      (Mnemonic::Get, &[R(value), R(base), R(offset)]) => Instruction::Get { value, base, offset },

      (Mnemonic::Add, &[R(rd), R(rs1), R(rs2)]) => Instruction::Add { rd, rs1, rs2 },
      (Mnemonic::Mlt, &[R(rd), R(rs1), R(rs2)]) => Instruction::Mlt { rd, rs1, rs2 },

      (Mnemonic::Addi, &[R(rd), R(rs1), I(imm)]) => Instruction::Addi { rd, rs1, imm },
      (Mnemonic::Slti, &[R(rd), R(rs1), I(imm)]) => Instruction::Slti { rd, rs1, imm },
      (Mnemonic::Set, &[R(rd), I(imm)]) => Instruction::Addi { rd, rs1: Register::ZERO, imm },
      (Mnemonic::Lw, &[R(rd), R(base), I(offset)]) => Instruction::Lw { rd, base, offset },

      (Mnemonic::Sw, &[R(base), I(offset), R(value)]) => Instruction::Sw { base, offset, value },
      (Mnemonic::Bne, &[R(rs1), R(rs2), I(offset)]) => Instruction::Bne { rs1, rs2, offset },

      (Mnemonic::Jal, &[R(rd), U(offset)]) => Instruction::Jal { rd, offset },
      (Mnemonic::Lui, &[R(rd), U(imm)]) => Instruction::Lui { rd, imm },

      _ => unreachable!("Error: operands of `{}` were not checked against its signature.", self),
    }
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Operand {
  Register(Register),
  Imm12(Imm12),
  Imm20(Imm20),
}

#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum AssemblyError {
  #[error("Error on line {line}: unrecognized operation `{token}`.")]
  UnknownOperation { line: usize, token: String },

  #[error("Error on line {line}: `{mnemonic}` requires {expected} operands but was given {found}.")]
  WrongOperandCount { line: usize, mnemonic: Mnemonic, expected: usize, found: usize },

  #[error("Error on line {line}: register `{token}` is not one of x0..x31.")]
  RegisterOutOfRange { line: usize, token: String },

  #[error("Error on line {line}: immediate `{token}` does not fit in {bits} signed bits.")]
  ImmediateOutOfRange { line: usize, token: String, bits: u32 },

  #[error("Error on line {line}: expected a register but found `{token}`.")]
  ExpectedRegister { line: usize, token: String },

  #[error("Error on line {line}: expected an immediate but found `{token}`.")]
  ExpectedImmediate { line: usize, token: String },

  #[error("Error on line {line}: cannot parse `{text}`.")]
  Syntax { line: usize, text: String },
}

impl AssemblyError {
  /// The 1-based source line the error was found on.
  pub fn line(&self) -> usize {
    match self {
      | AssemblyError::UnknownOperation { line, .. }
      | AssemblyError::WrongOperandCount { line, .. }
      | AssemblyError::RegisterOutOfRange { line, .. }
      | AssemblyError::ImmediateOutOfRange { line, .. }
      | AssemblyError::ExpectedRegister { line, .. }
      | AssemblyError::ExpectedImmediate { line, .. }
      | AssemblyError::Syntax { line, .. } => *line
    }
  }
}

// region Parsers

fn token(input: &str) -> IResult<&str, &str> {
  is_not(" \t,#")(input)
}

fn separator(input: &str) -> IResult<&str, &str> {
  alt((recognize(tuple((space0, one_char(','), space0))), space1))(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
  preceded(one_char('#'), rest)(input)
}

/// Splits a line into its mnemonic and operand tokens, or `None` for a blank or comment line.
fn parse_line(input: &str) -> IResult<&str, Option<(&str, Vec<&str>)>> {
  all_consuming(
    delimited(
      space0,
      opt(pair(token, many0(preceded(separator, token)))),
      pair(space0, opt(comment))
    )
  )(input)
}

fn register_p(input: &str) -> IResult<&str, &str> {
  all_consuming(preceded(one_char('x'), digit1))(input)
}

fn immediate_p(input: &str) -> IResult<&str, &str> {
  all_consuming(recognize(pair(opt(one_of("+-")), digit1)))(input)
}

// endregion

fn parse_register(line: usize, text: &str) -> Result<Register, AssemblyError> {
  let (_, digits) =
    register_p(text).map_err(|_| AssemblyError::ExpectedRegister { line, token: text.to_string() })?;

  match digits.parse::<usize>() {
    Ok(idx) if idx < GENERAL_REGISTER_COUNT => Ok(Register::x(idx as u8)),
    _ => Err(AssemblyError::RegisterOutOfRange { line, token: text.to_string() })
  }
}

fn parse_immediate(line: usize, text: &str, bits: u32) -> Result<i64, AssemblyError> {
  let (_, number) =
    immediate_p(text).map_err(|_| AssemblyError::ExpectedImmediate { line, token: text.to_string() })?;

  number
    .parse::<i64>()
    .map_err(|_| AssemblyError::ImmediateOutOfRange { line, token: text.to_string(), bits })
}

fn parse_operand(line: usize, kind: OperandKind, text: &str) -> Result<Operand, AssemblyError> {
  let out_of_range = || {
    AssemblyError::ImmediateOutOfRange {
      line,
      token: text.to_string(),
      bits: match kind {
        OperandKind::Imm20 => IMM20_BITS,
        _ => IMM12_BITS
      }
    }
  };

  match kind {

    OperandKind::Register => Ok(Operand::Register(parse_register(line, text)?)),

    OperandKind::Imm12 => {
      let value = parse_immediate(line, text, IMM12_BITS)?;
      Imm12::new(value).map(Operand::Imm12).ok_or_else(out_of_range)
    }

    OperandKind::Imm20 => {
      let value = parse_immediate(line, text, IMM20_BITS)?;
      Imm20::new(value).map(Operand::Imm20).ok_or_else(out_of_range)
    }

  }
}

fn assemble_line(line: usize, name: &str, args: &[&str]) -> Result<Instruction, AssemblyError> {
  let mnemonic =
    Mnemonic::from_str(name)
      .map_err(|_| AssemblyError::UnknownOperation { line, token: name.to_string() })?;

  let kinds = mnemonic.operands();
  if kinds.len() != args.len() {
    return Err(
      AssemblyError::WrongOperandCount {
        line,
        mnemonic,
        expected: kinds.len(),
        found: args.len()
      }
    );
  }

  let operands =
    kinds
      .iter()
      .zip(args)
      .map(|(kind, text)| parse_operand(line, *kind, text))
      .collect::<Result<Vec<Operand>, AssemblyError>>()?;

  Ok(mnemonic.build(&operands))
}

/// Assembles `text` into the words to hand to `Machine::load`, one word per instruction line in
/// source order.
pub fn assemble(text: &str) -> Result<Vec<Word>, AssemblyError> {
  let mut words: Vec<Word> = Vec::new();

  for (idx, source) in text.lines().enumerate() {
    let line = idx + 1;

    let (name, args) =
      match parse_line(source) {
        Ok((_, Some(parsed))) => parsed,
        Ok((_, None))         => continue, // Blank or comment
        Err(_e)               => {
          return Err(AssemblyError::Syntax { line, text: source.trim().to_string() });
        }
      };

    let instruction = assemble_line(line, name, &args)?;
    trace!(line, %instruction, "assembled");
    words.push(instruction.encode());
  }

  debug!(words = words.len(), "assembly complete");
  Ok(words)
}
