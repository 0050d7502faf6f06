/*!

  The machine uses a 32 bit word size. Every instruction is exactly one word, and memory is an
  array of words addressed by byte. An instruction's address, and the address of every load and
  store, must therefore be a multiple of `WORD_BYTES`; anything else is a fault.

  Fields are laid out starting from the most significant bit. The offset of a field is the
  number of bits that precede it, so the opcode, at offset 0, occupies the top 7 bits. The
  sizes of instruction components are as follows:

    Opcode:     7 bits
    Register:   5 bits
    Funct:      3 bits
    Immediate: 12 or 20 bits, two's complement

  There are six instruction shapes:

    R       [Op:7][Rd:5][Rs1:5][Rs2:5][Funct:3][Reserved:7]
    I       [Op:7][Rd:5][Rs1:5][Imm:12][Funct:3]
    S/B     [Op:7][Rs1:5][Rs2:5][Imm:12][Funct:3]
    U/J     [Op:7][Rd:5][Imm:20]
    Legacy  [Op:7][Value:5][Base:5][Offset:5][Reserved:10]
    Halt    [Op:7][Reserved:25]

  The legacy shape belongs to `put` and `get`, which address memory with the sum of two
  registers rather than a register and an immediate.

  A register field holds 5 bits, so only `x0` through `x31` can be named by an instruction.
  The program counter occupies the 33rd slot of the register file and is reachable only
  through jumps and branches.

  The funct field distinguishes sibling operations sharing one opcode. Only `Op`, `Imm`, and
  `Branch` look at it; every other opcode encodes zero there.

*/

mod assembly;
mod binary;
mod fields;
mod instruction;

pub use assembly::{assemble, AssemblyError, Mnemonic, OperandKind};
pub use binary::{
  decode_i, decode_legacy, decode_r, decode_sb, decode_uj, encode_halt, encode_i, encode_legacy,
  encode_r, encode_sb, encode_uj, IShape, LegacyShape, RShape, SBShape, UJShape,
};
pub use fields::{
  pack, pack_opcode, sign_extend, unpack, unpack_opcode, Field, Funct, Imm12, Imm20, FUNCT_BITS,
  IMM12_BITS, IMM20_BITS, OPCODE_BITS, REGISTER_BITS, WORD_BITS,
};
pub use instruction::{
  BranchFunct, DecodeError, ImmFunct, Instruction, OpFunct, Opcode, Shape, OPCODE_SENTINEL,
};

// If you change this you must also change the field widths in `fields`.
pub type Word = u32;

/// Bytes per word. The program counter advances by this much per instruction.
pub const WORD_BYTES: u32 = WORD_BITS / 8;
