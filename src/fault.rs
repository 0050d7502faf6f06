use thiserror::Error;

use crate::bytecode::{DecodeError, Opcode, Word};

/// Conditions that abort execution. There is no recovery: a fault means the program being run
/// is malformed. The machine is left exactly as it was before the faulting instruction.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fault {
  #[error("unaligned access to address {address:#x}")]
  Misaligned { address: Word },

  #[error("address {address:#x} is outside of memory")]
  OutOfBounds { address: Word },

  #[error("no operation is bound to opcode {opcode} (pc = {pc:#x})")]
  IllegalOpcode { pc: Word, opcode: u8 },

  #[error("no operation is bound to funct {funct} of opcode `{opcode}` (pc = {pc:#x})")]
  UnboundFunct { pc: Word, opcode: Opcode, funct: u8 },
}

impl Fault {
  /// Attributes a decoding failure to the instruction at `pc`.
  pub fn from_decode(pc: Word, error: DecodeError) -> Fault {
    match error {
      DecodeError::UnknownOpcode(opcode)         => Fault::IllegalOpcode { pc, opcode },
      DecodeError::UnboundFunct { opcode, funct } => Fault::UnboundFunct { pc, opcode, funct },
    }
  }
}
