//! Run-time settings of a `Machine`. Build-time settings are Cargo features; see
//! `trace_computation` in `Cargo.toml`.

/// Words of memory in a default machine.
pub const DEFAULT_MEMORY_WORDS: usize = 1000;

/// What to do when an opcode that multiplexes several operations meets a funct value with
/// nothing bound to it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FunctPolicy {
  /// Execute it as a no-op. The program counter still advances.
  Ignore,
  /// Abort with `Fault::UnboundFunct`.
  Fault,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct MachineConfig {
  /// Size of memory in words. Addresses run from 0 to `4 * memory_words - 4`.
  pub memory_words: usize,
  pub unbound_funct: FunctPolicy,
}

impl Default for MachineConfig {
  fn default() -> MachineConfig {
    MachineConfig {
      memory_words: DEFAULT_MEMORY_WORDS,
      unbound_funct: FunctPolicy::Ignore,
    }
  }
}

impl MachineConfig {
  pub fn with_memory_words(mut self, memory_words: usize) -> MachineConfig {
    self.memory_words = memory_words;
    self
  }

  pub fn with_unbound_funct(mut self, policy: FunctPolicy) -> MachineConfig {
    self.unbound_funct = policy;
    self
  }
}
