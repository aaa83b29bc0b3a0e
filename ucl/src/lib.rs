// riscv2ucl - UCLID5 models from riscv-tests binaries
//
// This library turns a compiled riscv-tests program into a UCLID5 module
// that pins the program into instruction memory and its initialized data
// into data memory, then runs the `cpu` model under bounded model checking.
//
// # Pipeline
//
// 1. **ELF Inspection** (`elf.rs`): reject non-RISC-V inputs, list sections
// 2. **Disassembly** (`objdump.rs`): `objdump -d` over `.text.init`, and
//    `objdump -s` over `.data` when the listing names that section
// 3. **Instruction Pass** (`text.rs`): listing lines to `imem` assumptions
// 4. **Data Pass** (`data.rs`): hex-dump rows to `dmem` assumptions
// 5. **Module Generation** (`ucl.rs`): fill the module template
// 6. **Driver** (`driver.rs`): discover test binaries, write one module each
//
// # Memory Model
//
// Both memories are indexed by 30-bit word addresses (byte address >> 2)
// and hold 32-bit words. Every instruction word that the listing does not
// mention is assumed to be `instructions.NOP`.

pub mod data;
pub mod driver;
pub mod elf;
pub mod error;
pub mod objdump;
pub mod text;
pub mod ucl;

pub use driver::{Config, Summary};
pub use error::{Error, Result};
pub use objdump::{Disassembler, Objdump};
pub use text::TextListing;
pub use ucl::UclModule;

use log::debug;
use std::path::Path;

/// Build the verification module for one binary.
///
/// The data pass runs only when the listing shows a `.data` section.
pub fn generate<D: Disassembler + ?Sized>(path: &Path, disassembler: &D) -> Result<UclModule> {
    let listing = disassembler.disassemble_instructions(path)?;
    let TextListing {
        mut lines,
        instruction_count,
        has_data,
    } = text::parse(&listing);
    debug!("  {} instructions", instruction_count);

    if has_data {
        let dump = disassembler.disassemble_data(path)?;
        let data = data::parse(&dump);
        debug!("  {} data words", data.len());
        lines.extend(data);
    }

    Ok(UclModule::new(
        path.display().to_string(),
        instruction_count,
        lines,
    ))
}
