//! The machine: a register file, a flat memory, and the fetch-decode-execute loop that runs
//! encoded instructions against them.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};
use tracing::{debug, trace, warn};

use crate::bytecode::*;
use crate::config::{FunctPolicy, MachineConfig};
use crate::fault::Fault;
use crate::memory::Memory;
use crate::register::{Register, GENERAL_REGISTER_COUNT, REGISTER_COUNT};

/// Whether the instruction at the program counter will do anything.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Status {
  Running,
  /// The program counter rests on a `hlt`. Stepping changes nothing.
  Halted
}

impl Display for Status {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Status::Running => write!(f, "Running"),
      Status::Halted  => write!(f, "Halted")
    }
  }
}

pub struct Machine {
  // Registers //
  registers : [Word; REGISTER_COUNT], // x0..x31, then the program counter

  // Memory Store
  memory    : Memory,

  config    : MachineConfig,
}

impl Machine {

  // region Display methods

  fn make_register_table(registers: &[Word]) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Register", ubl->"Contents"]);

    for (i, value) in registers.iter().enumerate() {
      // The zero register and untouched registers are noise.
      if *value == 0 && i < GENERAL_REGISTER_COUNT {
        continue;
      }
      let register = Register::new(i as u8).unwrap_or(Register::PC);
      table.add_row(
        row![r->format!("{} =", register), format!("{:#010x} ({})", value, *value as i32)]
      );
    }
    table
  }

  fn make_memory_table(memory: &[Word], highlight: Word) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents", ubl->"Disassembly"]);

    for (i, word) in memory.iter().enumerate() {
      let address = (i as Word).wrapping_mul(WORD_BYTES);
      let at_pc = address == highlight;
      if *word == 0 && !at_pc {
        continue;
      }

      let text =
        match Instruction::decode(*word) {
          Ok(instruction) => instruction.to_string(),
          Err(_e)         => String::from("-")
        };

      match at_pc {

        true  => {
          table.add_row(
            row![r->format!("* --> {:#06x} =", address), format!("{:#010x}", word), text]
          );
        }

        false => {
          table.add_row(
            row![r->format!("{:#06x} =", address), format!("{:#010x}", word), text]
          );
        }

      } // end match on highlight
    } // end for
    table
  }

  // endregion

  // region Low-level utility methods

  pub fn new() -> Machine {
    Machine::with_config(MachineConfig::default())
  }

  pub fn with_config(config: MachineConfig) -> Machine {
    Machine {
      registers : [0; REGISTER_COUNT],
      memory    : Memory::new(config.memory_words),
      config,
    }
  }

  pub fn config(&self) -> &MachineConfig {
    &self.config
  }

  /// Copies `words` into memory starting at the word-aligned byte address `offset`. Nothing is
  /// written unless all of `words` fits.
  pub fn load(&mut self, offset: Word, words: &[Word]) -> Result<(), Fault> {
    debug!(offset, words = words.len(), "load");
    self.memory.load(offset, words)
  }

  /// The whole register file, the program counter last.
  pub fn registers(&self) -> &[Word; REGISTER_COUNT] {
    &self.registers
  }

  pub fn register(&self, register: Register) -> Word {
    match register.is_zero() {
      true  => 0,
      false => self.registers[register.idx()]
    }
  }

  pub fn pc(&self) -> Word {
    self.register(Register::PC)
  }

  pub fn memory(&self) -> &[Word] {
    self.memory.words()
  }

  pub fn read_word(&self, address: Word) -> Result<Word, Fault> {
    self.memory.read(address)
  }

  /// Reports whether the next `step` would halt, without executing anything.
  pub fn status(&self) -> Status {
    match self.memory.read(self.pc()).map(unpack_opcode) {
      Ok(Ok(Opcode::Hlt)) => Status::Halted,
      _                   => Status::Running
    }
  }

  /// Every register write, the program counter's included, goes through here. Writes to `x0`
  /// are discarded.
  fn write_register(&mut self, register: Register, value: Word) {
    if register.is_zero() {
      return;
    }
    self.registers[register.idx()] = value;
  }

  fn advance(&mut self) {
    let next = self.pc().wrapping_add(WORD_BYTES);
    self.write_register(Register::PC, next);
  }

  // endregion

  // region Fetch-decode-execute

  /**
    Executes the instruction at the program counter.

    A `hlt` returns `Status::Halted` without touching any state. Anything else runs its handler
    and then advances the program counter by one instruction. The advance also follows a taken
    jump or branch, so control lands one instruction past `pc + offset`.

    A fault aborts before the program counter moves, leaving the machine as it was.
  */
  pub fn step(&mut self) -> Result<Status, Fault> {
    let pc = self.pc();
    let word = self.memory.read(pc)?;
    let opcode = unpack_opcode(word).map_err(|opcode| Fault::IllegalOpcode { pc, opcode })?;
    let illegal = move |error: DecodeError| Fault::from_decode(pc, error);

    trace!(pc, word, %opcode, "step");

    match opcode {
      Opcode::Hlt    => return Ok(Status::Halted),
      Opcode::Put    => self.exec_put(decode_legacy(word).map_err(illegal)?)?,
      Opcode::Get    => self.exec_get(decode_legacy(word).map_err(illegal)?)?,
      Opcode::Op     => self.exec_op(pc, decode_r(word).map_err(illegal)?)?,
      Opcode::Mlt    => self.exec_mlt(decode_r(word).map_err(illegal)?),
      Opcode::Imm    => self.exec_imm(pc, decode_i(word).map_err(illegal)?)?,
      Opcode::Branch => self.exec_branch(pc, decode_sb(word).map_err(illegal)?)?,
      Opcode::Jal    => self.exec_jal(pc, decode_uj(word).map_err(illegal)?),
      Opcode::Lui    => self.exec_lui(decode_uj(word).map_err(illegal)?),
      Opcode::Lw     => self.exec_lw(decode_i(word).map_err(illegal)?)?,
      Opcode::Sw     => self.exec_sw(decode_sb(word).map_err(illegal)?)?,
    }

    self.advance();

    #[cfg(feature = "trace_computation")] trace!("\n{}", self);

    Ok(Status::Running)
  }

  /// Steps until the machine halts or `budget` steps have been taken, whichever comes first.
  pub fn run(&mut self, budget: usize) -> Result<Status, Fault> {
    debug!(budget, pc = self.pc(), "run");

    let mut status = self.status();
    for taken in 0..budget {
      status =
        self.step().map_err(|fault| {
          warn!(%fault, steps = taken, "run aborted");
          fault
        })?;

      if status == Status::Halted {
        debug!(steps = taken, pc = self.pc(), "halted");
        return Ok(status);
      }
    }

    debug!(budget, pc = self.pc(), "step budget exhausted");
    Ok(status)
  }

  // endregion

  // region Instruction handlers

  /// Handles a funct value with no operation bound to it, according to the configured policy.
  fn unbound_funct(&self, pc: Word, opcode: Opcode, funct: Funct) -> Result<(), Fault> {
    match self.config.unbound_funct {

      FunctPolicy::Ignore => {
        debug!(pc, %opcode, funct = funct.0, "unbound funct executed as a no-op");
        Ok(())
      }

      FunctPolicy::Fault => Err(Fault::UnboundFunct { pc, opcode, funct: funct.0 }),

    }
  }

  /// `put value base offset`: memory[base + offset] <- value
  fn exec_put(&mut self, shape: LegacyShape) -> Result<(), Fault> {
    let address = self.register(shape.base).wrapping_add(self.register(shape.offset));
    self.memory.write(address, self.register(shape.value))
  }

  /// `get value base offset`: value <- memory[base + offset]
  fn exec_get(&mut self, shape: LegacyShape) -> Result<(), Fault> {
    let address = self.register(shape.base).wrapping_add(self.register(shape.offset));
    let word = self.memory.read(address)?;
    self.write_register(shape.value, word);
    Ok(())
  }

  fn exec_op(&mut self, pc: Word, shape: RShape) -> Result<(), Fault> {
    let RShape { rd, rs1, rs2, funct, .. } = shape;

    match OpFunct::try_from(funct.0) {

      Ok(OpFunct::Add) => {
        let sum = self.register(rs1).wrapping_add(self.register(rs2));
        self.write_register(rd, sum);
      }

      Err(_e) => self.unbound_funct(pc, Opcode::Op, funct)?,

    }
    Ok(())
  }

  fn exec_mlt(&mut self, shape: RShape) {
    let product = self.register(shape.rs1).wrapping_mul(self.register(shape.rs2));
    self.write_register(shape.rd, product);
  }

  fn exec_imm(&mut self, pc: Word, shape: IShape) -> Result<(), Fault> {
    let IShape { rd, rs1, imm, funct, .. } = shape;

    match ImmFunct::try_from(funct.0) {

      Ok(ImmFunct::Addi) => {
        let sum = self.register(rs1).wrapping_add(imm.value() as Word);
        self.write_register(rd, sum);
      }

      Ok(ImmFunct::Slti) => {
        let less = (self.register(rs1) as i32) < imm.value();
        self.write_register(rd, less as Word);
      }

      Err(_e) => self.unbound_funct(pc, Opcode::Imm, funct)?,

    }
    Ok(())
  }

  /// Adds the offset to the program counter. `step` then advances past the target.
  fn exec_branch(&mut self, pc: Word, shape: SBShape) -> Result<(), Fault> {
    let SBShape { rs1, rs2, imm, funct, .. } = shape;

    match BranchFunct::try_from(funct.0) {

      Ok(BranchFunct::Bne) => {
        if self.register(rs1) != self.register(rs2) {
          self.write_register(Register::PC, pc.wrapping_add(imm.value() as Word));
        }
      }

      Err(_e) => self.unbound_funct(pc, Opcode::Branch, funct)?,

    }
    Ok(())
  }

  /// Links the address of the next instruction into `rd` and adds the offset to the program
  /// counter. As with branches, `step` then advances past the target.
  fn exec_jal(&mut self, pc: Word, shape: UJShape) {
    self.write_register(shape.rd, pc.wrapping_add(WORD_BYTES));
    self.write_register(Register::PC, pc.wrapping_add(shape.imm.value() as Word));
  }

  fn exec_lui(&mut self, shape: UJShape) {
    self.write_register(shape.rd, (shape.imm.value() as Word) << IMM12_BITS);
  }

  /// `lw rd base offset`: rd <- memory[base + offset]
  fn exec_lw(&mut self, shape: IShape) -> Result<(), Fault> {
    let address = self.register(shape.rs1).wrapping_add(shape.imm.value() as Word);
    let word = self.memory.read(address)?;
    self.write_register(shape.rd, word);
    Ok(())
  }

  /// `sw base offset value`: memory[base + offset] <- value
  fn exec_sw(&mut self, shape: SBShape) -> Result<(), Fault> {
    let address = self.register(shape.rs1).wrapping_add(shape.imm.value() as Word);
    self.memory.write(address, self.register(shape.rs2))
  }

  // endregion

}

impl Default for Machine {
  fn default() -> Machine {
    Machine::new()
  }
}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for Machine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let r_table = Machine::make_register_table(&self.registers);
    let m_table = Machine::make_memory_table(self.memory.words(), self.pc());

    let mut combined_table = table!([r_table, m_table]);

    combined_table.set_titles(row![ub->"Registers", ub->"Memory"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    write!(f, "Status: {}\n{}", self.status(), combined_table)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  const LOOP_PROGRAM: &str = "
    # x8 = x1 * x2 by repeated addition
    set x1 10
    set x2 5
    set x8 0
    slti x3 x1 1      # 12
    bne x3 x0 12      # 16: exit to the sw at 32
    addi x1 x1 -1     # 20
    add x8 x8 x2      # 24
    jal x0 -20        # 28: back to the slti at 12
    sw x7 0 x8        # 32
    hlt               # 36
  ";

  fn x(idx: u8) -> Register {
    Register::x(idx)
  }

  fn machine_with(source: &str) -> Machine {
    machine_with_config(source, MachineConfig::default())
  }

  fn machine_with_config(source: &str, config: MachineConfig) -> Machine {
    let mut machine = Machine::with_config(config);
    machine.load(0, &assemble(source).unwrap()).unwrap();
    machine
  }

  fn step_n(machine: &mut Machine, n: usize) {
    for _ in 0..n {
      assert_eq!(machine.step(), Ok(Status::Running));
    }
  }

  #[test]
  fn arithmetic_loop(){
    let mut machine = machine_with(LOOP_PROGRAM);
    assert_eq!(machine.run(1000), Ok(Status::Halted));
    assert_eq!(machine.read_word(0), Ok(50));
    assert_eq!(machine.memory()[0], 50);
    assert_eq!(machine.register(x(1)), 0);
    assert_eq!(machine.register(x(8)), 50);
    assert_eq!(machine.pc(), 36);
  }

  #[test]
  fn arithmetic_loop_step_count(){
    let mut machine = machine_with(LOOP_PROGRAM);
    // 3 setup + 10 iterations of 5 + the exiting slti, bne, and sw.
    assert_eq!(machine.run(56), Ok(Status::Running));
    assert_eq!(machine.pc(), 36);
    assert_eq!(machine.status(), Status::Halted);
    assert_eq!(machine.step(), Ok(Status::Halted));
  }

  #[test]
  fn multiply(){
    let mut machine = machine_with("set x1 10\nset x2 5\nmlt x8 x1 x2\nhlt");
    step_n(&mut machine, 3);
    assert_eq!(machine.register(x(8)), 50);
    assert_eq!(machine.step(), Ok(Status::Halted));
  }

  #[test]
  fn halt_changes_nothing(){
    let mut machine = machine_with("hlt\nset x1 1");
    let registers = *machine.registers();
    let memory = machine.memory().to_vec();

    assert_eq!(machine.step(), Ok(Status::Halted));
    assert_eq!(machine.step(), Ok(Status::Halted));
    assert_eq!(machine.run(10), Ok(Status::Halted));
    assert_eq!(*machine.registers(), registers);
    assert_eq!(machine.memory(), &memory[..]);
  }

  #[test]
  fn zero_register_ignores_writes(){
    let mut machine = machine_with("
      set x1 3
      set x2 8
      addi x0 x0 5
      slti x0 x0 1
      add x0 x1 x1
      mlt x0 x1 x1
      lui x0 1
      lw x0 x2 0
      get x0 x2 x0
      set x0 -1
      jal x0 0
      hlt
    ");
    step_n(&mut machine, 2);
    for _ in 0..9 {
      let before = *machine.registers();
      assert_eq!(machine.step(), Ok(Status::Running));
      assert_eq!(machine.register(Register::ZERO), 0);
      assert_eq!(machine.registers()[0], 0);
      // Only the program counter moved.
      assert_eq!(&machine.registers()[..GENERAL_REGISTER_COUNT], &before[..GENERAL_REGISTER_COUNT]);
    }
    assert_eq!(machine.step(), Ok(Status::Halted));
  }

  #[test]
  fn program_counter_advances_one_word(){
    let mut machine = machine_with("
      set x5 400
      set x6 8
      add x1 x5 x6
      mlt x2 x5 x6
      slti x3 x5 0
      lui x4 2
      sw x5 0 x6
      lw x7 x5 0
      put x6 x5 x6
      get x8 x5 x6
      bne x0 x0 100
      nop
      hlt
    ");
    for _ in 0..12 {
      let pc = machine.pc();
      assert_eq!(machine.step(), Ok(Status::Running));
      assert_eq!(machine.pc(), pc + WORD_BYTES);
    }
    assert_eq!(machine.pc(), 48);
    assert_eq!(machine.step(), Ok(Status::Halted));
  }

  #[test]
  fn immediate_arithmetic(){
    let mut machine = machine_with("
      set x1 -1
      addi x2 x1 1
      slti x3 x1 0
      slti x4 x1 -1
      slti x5 x1 -2048
      hlt
    ");
    assert_eq!(machine.run(100), Ok(Status::Halted));
    assert_eq!(machine.register(x(1)), 0xFFFF_FFFF);
    assert_eq!(machine.register(x(2)), 0);
    assert_eq!(machine.register(x(3)), 1);
    assert_eq!(machine.register(x(4)), 0);
    assert_eq!(machine.register(x(5)), 0);
  }

  #[test]
  fn register_arithmetic_wraps(){
    let mut machine = machine_with("
      lui x1 16
      mlt x2 x1 x1
      set x3 -1
      set x4 2
      add x5 x3 x4
      mlt x6 x3 x4
      hlt
    ");
    assert_eq!(machine.run(100), Ok(Status::Halted));
    assert_eq!(machine.register(x(1)), 1 << 16);
    assert_eq!(machine.register(x(2)), 0);
    assert_eq!(machine.register(x(5)), 1);
    assert_eq!(machine.register(x(6)), 0xFFFF_FFFE);
  }

  #[test]
  fn load_upper_immediate(){
    let mut machine = machine_with("lui x1 1\nlui x2 -1\nlui x3 524287\nhlt");
    assert_eq!(machine.run(100), Ok(Status::Halted));
    assert_eq!(machine.register(x(1)), 0x0000_1000);
    assert_eq!(machine.register(x(2)), 0xFFFF_F000);
    assert_eq!(machine.register(x(3)), 0x7FFF_F000);
  }

  #[test]
  fn store_and_load_word(){
    let mut machine = machine_with("
      set x7 400
      set x8 77
      sw x7 4 x8
      lw x9 x7 4
      sw x7 -4 x9
      hlt
    ");
    assert_eq!(machine.run(100), Ok(Status::Halted));
    assert_eq!(machine.memory()[101], 77);
    assert_eq!(machine.memory()[99], 77);
    assert_eq!(machine.register(x(9)), 77);
  }

  #[test]
  fn put_and_get_add_two_registers(){
    let mut machine = machine_with("
      set x5 400
      set x6 8
      set x8 9
      put x8 x5 x6
      get x9 x5 x6
      hlt
    ");
    assert_eq!(machine.run(100), Ok(Status::Halted));
    assert_eq!(machine.read_word(408), Ok(9));
    assert_eq!(machine.register(x(9)), 9);
  }

  #[test]
  fn taken_branch_lands_past_target(){
    let mut machine = machine_with("set x1 1\nbne x1 x0 8\nset x2 1\nset x3 1\nset x4 1\nhlt");
    step_n(&mut machine, 2);
    // 4 + 8, then the unconditional advance.
    assert_eq!(machine.pc(), 16);
    assert_eq!(machine.run(10), Ok(Status::Halted));
    assert_eq!(machine.register(x(2)), 0);
    assert_eq!(machine.register(x(3)), 0);
    assert_eq!(machine.register(x(4)), 1);
  }

  #[test]
  fn untaken_branch_falls_through(){
    let mut machine = machine_with("bne x0 x0 8\nhlt");
    step_n(&mut machine, 1);
    assert_eq!(machine.pc(), 4);
    assert_eq!(machine.status(), Status::Halted);
  }

  #[test]
  fn jump_and_link(){
    let mut machine = machine_with("nop\nnop\njal x1 8\nhlt\nhlt\nhlt");
    step_n(&mut machine, 3);
    assert_eq!(machine.register(x(1)), 12);
    assert_eq!(machine.pc(), 20);

    let mut machine = machine_with("set x1 0\njal x0 -4\nhlt");
    // Jumping back by one instruction repeats the jump forever.
    step_n(&mut machine, 10);
    assert_eq!(machine.pc(), 4);
  }

  #[test]
  fn misaligned_store_faults_without_writing(){
    let mut machine = machine_with("set x7 402\nset x8 5\nsw x7 0 x8\nhlt");
    step_n(&mut machine, 2);
    let memory = machine.memory().to_vec();
    assert_eq!(machine.step(), Err(Fault::Misaligned { address: 402 }));
    assert_eq!(machine.memory(), &memory[..]);
    assert_eq!(machine.pc(), 8);
  }

  #[test]
  fn misaligned_loads_fault(){
    let mut machine = machine_with("lw x1 x0 1\nhlt");
    assert_eq!(machine.step(), Err(Fault::Misaligned { address: 1 }));
    assert_eq!(machine.register(x(1)), 0);

    let mut machine = machine_with("set x1 1\nset x2 2\nget x3 x1 x2\nhlt");
    assert_eq!(machine.run(10), Err(Fault::Misaligned { address: 3 }));
    assert_eq!(machine.pc(), 8);

    let mut machine = machine_with("set x1 1\nput x1 x1 x0\nhlt");
    assert_eq!(machine.run(10), Err(Fault::Misaligned { address: 1 }));
  }

  #[test]
  fn out_of_bounds_access_faults(){
    let mut machine = machine_with("lui x7 1\nsw x7 0 x1\nhlt");
    assert_eq!(machine.run(10), Err(Fault::OutOfBounds { address: 4096 }));

    let mut machine = machine_with("jal x0 4000\nhlt");
    step_n(&mut machine, 1);
    assert_eq!(machine.step(), Err(Fault::OutOfBounds { address: 4004 }));
  }

  #[test]
  fn illegal_opcode_faults(){
    let mut machine = Machine::new();
    machine.load(0, &[0x7F << 25]).unwrap();
    assert_eq!(machine.step(), Err(Fault::IllegalOpcode { pc: 0, opcode: 0x7F }));
    assert_eq!(machine.pc(), 0);
  }

  #[test]
  fn unbound_funct_is_ignored_by_default(){
    let word = encode_r(Opcode::Op, x(1), x(2), x(2), Funct(3));
    let mut machine = Machine::new();
    machine.load(0, &[encode_i(Opcode::Imm, x(2), x(0), Imm12::new(9).unwrap(), Funct(0)), word]).unwrap();
    step_n(&mut machine, 2);
    assert_eq!(machine.register(x(1)), 0);
    assert_eq!(machine.pc(), 8);
  }

  #[test]
  fn unbound_funct_can_fault(){
    let config = MachineConfig::default().with_unbound_funct(FunctPolicy::Fault);
    for (opcode, word) in vec![
      (Opcode::Op, encode_r(Opcode::Op, x(1), x(2), x(3), Funct(1))),
      (Opcode::Imm, encode_i(Opcode::Imm, x(1), x(2), Imm12::new(1).unwrap(), Funct(7))),
      (Opcode::Branch, encode_sb(Opcode::Branch, x(1), x(2), Imm12::new(1).unwrap(), Funct(2))),
    ] {
      let mut machine = Machine::with_config(config);
      machine.load(0, &[word]).unwrap();
      let funct = match opcode {
        Opcode::Op  => 1,
        Opcode::Imm => 7,
        _           => 2
      };
      assert_eq!(machine.step(), Err(Fault::UnboundFunct { pc: 0, opcode, funct }));
      assert_eq!(machine.pc(), 0);
    }
  }

  #[test]
  fn load_at_offset(){
    let mut machine = Machine::with_config(MachineConfig::default().with_memory_words(8));
    assert_eq!(machine.memory().len(), 8);
    assert_eq!(machine.load(2, &[1]), Err(Fault::Misaligned { address: 2 }));
    assert_eq!(machine.load(24, &[1, 2, 3]), Err(Fault::OutOfBounds { address: 32 }));
    assert_eq!(machine.load(24, &[1, 2]), Ok(()));
    assert_eq!(machine.memory(), &[0, 0, 0, 0, 0, 0, 1, 2]);
  }

  #[test]
  fn zero_budget_does_nothing(){
    let mut machine = machine_with("set x1 1\nhlt");
    assert_eq!(machine.run(0), Ok(Status::Running));
    assert_eq!(machine.pc(), 0);
    assert_eq!(machine.register(x(1)), 0);
  }

  #[test]
  fn machine_table(){
    let mut machine = machine_with(LOOP_PROGRAM);
    machine.run(1000).unwrap();
    let text = machine.to_string();
    assert!(text.starts_with("Status: Halted"));
    assert!(text.contains("x8 ="));
    assert!(text.contains("pc ="));
    assert!(text.contains("bne x3 x0 12"));
    assert!(text.contains("* --> 0x0024"));
  }
}
