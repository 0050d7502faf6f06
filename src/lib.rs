/*!
  A small RISC-style instruction set: the bit layout of its instructions, a machine that steps
  through them, and an assembler for its textual form.

  ```
  use tinyrisc::{assemble, Machine, Register, Status};

  let program = assemble("set x1 6\nset x2 7\nmlt x3 x1 x2\nhlt").unwrap();
  let mut machine = Machine::new();
  machine.load(0, &program).unwrap();

  assert_eq!(machine.run(100), Ok(Status::Halted));
  assert_eq!(machine.register(Register::x(3)), 42);
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod bytecode;
pub mod config;
pub mod fault;
pub mod machine;
pub mod memory;
pub mod register;

pub use crate::bytecode::{assemble, AssemblyError, Instruction, Opcode, Word};
pub use crate::config::{FunctPolicy, MachineConfig};
pub use crate::fault::Fault;
pub use crate::machine::{Machine, Status};
pub use crate::register::Register;
