//! A flat, fixed-size array of words addressed by byte.

use crate::bytecode::{Word, WORD_BYTES};
use crate::fault::Fault;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Memory {
  words: Vec<Word>,
}

impl Memory {

  /// Zero-initialized memory of `words` words.
  pub fn new(words: usize) -> Memory {
    Memory {
      words: vec![0; words]
    }
  }

  pub fn words(&self) -> &[Word] {
    &self.words
  }

  /// Converts a byte address to an index into `words`.
  fn word_index(&self, address: Word) -> Result<usize, Fault> {
    if address % WORD_BYTES != 0 {
      return Err(Fault::Misaligned { address });
    }
    let idx = (address / WORD_BYTES) as usize;
    match idx < self.words.len() {
      true  => Ok(idx),
      false => Err(Fault::OutOfBounds { address })
    }
  }

  pub fn read(&self, address: Word) -> Result<Word, Fault> {
    let idx = self.word_index(address)?;
    Ok(self.words[idx])
  }

  pub fn write(&mut self, address: Word, value: Word) -> Result<(), Fault> {
    let idx = self.word_index(address)?;
    self.words[idx] = value;
    Ok(())
  }

  /// Copies `data` into memory starting at byte address `address`. Nothing is written unless
  /// all of it fits.
  pub fn load(&mut self, address: Word, data: &[Word]) -> Result<(), Fault> {
    if address % WORD_BYTES != 0 {
      return Err(Fault::Misaligned { address });
    }
    let start = (address / WORD_BYTES) as usize;
    let end   = start + data.len();
    if end > self.words.len() {
      // The first address that would have been written past the end.
      let first_outside = start.max(self.words.len()) as u64 * WORD_BYTES as u64;
      return Err(Fault::OutOfBounds { address: first_outside as Word });
    }
    self.words[start..end].copy_from_slice(data);
    Ok(())
  }
}
