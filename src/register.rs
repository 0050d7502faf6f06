//! A register index, `x0` through `x31` plus the program counter, with some convenience
//! functions.

use std::fmt::{Display, Formatter};

// `RegisterNumberType` is `u8`, as there are only 33 register slots.
pub type RegisterNumberType = u8;

/// Number of general purpose registers, `x0..x31`.
pub const GENERAL_REGISTER_COUNT: usize = 32;
/// Total slots in the register file, the general registers followed by the program counter.
pub const REGISTER_COUNT: usize = GENERAL_REGISTER_COUNT + 1;

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct Register(RegisterNumberType);

impl Register {
  /// The hard-wired zero register `x0`. Writes to it are discarded.
  pub const ZERO: Register = Register(0);
  /// The program counter. It lives in the register file but has no encoding in an instruction.
  pub const PC: Register = Register(GENERAL_REGISTER_COUNT as RegisterNumberType);

  /// Returns `None` if `idx` does not name a slot of the register file.
  pub fn new(idx: RegisterNumberType) -> Option<Register> {
    match (idx as usize) < REGISTER_COUNT {
      true  => Some(Register(idx)),
      false => None
    }
  }

  /// Converts an index known to be in range into a general register, `x{idx}`.
  ///
  /// Panics if `idx` is not a general register.
  pub fn x(idx: RegisterNumberType) -> Register {
    if (idx as usize) < GENERAL_REGISTER_COUNT {
      return Register(idx);
    }
    unreachable!("Error: x{} is not a general register.", idx);
  }

  /// Converts the register to an index into the register file.
  pub fn idx(&self) -> usize {
    self.0 as usize
  }

  pub fn number(&self) -> RegisterNumberType {
    self.0
  }

  pub fn is_zero(&self) -> bool {
    self.0 == 0
  }

  pub fn is_pc(&self) -> bool {
    *self == Register::PC
  }
}


impl Display for Register {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.is_pc() {
      true  => write!(f, "pc"),
      false => write!(f, "x{}", self.0)
    }
  }
}
