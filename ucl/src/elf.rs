// elf.rs - ELF inspection for riscv-tests binaries
//
// Uses goblin to check the machine type and list sections before the
// binary is handed to objdump.

use crate::error::{Error, Result};
use goblin::elf::Elf;
use std::path::Path;

/// Section holding the test program's code
pub const TEXT_SECTION: &str = ".text.init";
/// Section holding initialized data
pub const DATA_SECTION: &str = ".data";

/// Information about a test binary
#[derive(Debug, Clone)]
pub struct ElfInfo {
    pub entry: u64,
    pub is_64: bool,
    pub sections: Vec<Section>,
}

/// A named section with file contents
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    pub addr: u64,
    pub size: u64,
}

impl ElfInfo {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// True when the binary carries a non-empty `.data` section
    pub fn has_data(&self) -> bool {
        self.section(DATA_SECTION).is_some_and(|s| s.size > 0)
    }
}

/// Parse ELF bytes and extract metadata
pub fn parse(path: &Path, data: &[u8]) -> Result<ElfInfo> {
    let elf = Elf::parse(data).map_err(|source| Error::Elf {
        path: path.to_path_buf(),
        source,
    })?;

    if elf.header.e_machine != goblin::elf::header::EM_RISCV {
        return Err(Error::NotRiscv {
            path: path.to_path_buf(),
            machine: elf.header.e_machine,
        });
    }

    let sections = elf
        .section_headers
        .iter()
        .filter(|sh| sh.sh_type != goblin::elf::section_header::SHT_NOBITS)
        .filter_map(|sh| {
            let name = elf.shdr_strtab.get_at(sh.sh_name)?;
            (!name.is_empty()).then(|| Section {
                name: name.to_string(),
                addr: sh.sh_addr,
                size: sh.sh_size,
            })
        })
        .collect();

    Ok(ElfInfo {
        entry: elf.entry,
        is_64: elf.is_64,
        sections,
    })
}

/// Read a binary from disk and inspect it
pub fn inspect(path: &Path) -> Result<ElfInfo> {
    let data = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    parse(path, &data)
}

/// Minimal ELF32 images for tests: header plus a section table holding
/// `.shstrtab` and a 16-byte `.data`
#[cfg(test)]
pub(crate) mod fixture {
    use goblin::elf::header::EM_RISCV;

    const EHDR_SIZE: usize = 52;
    const SHDR_SIZE: usize = 40;
    const SHSTRTAB: &[u8] = b"\0.shstrtab\0.data\0";
    const DATA_OFFSET: usize = 72;
    const DATA_SIZE: usize = 16;
    const SHDR_OFFSET: usize = DATA_OFFSET + DATA_SIZE;

    pub const ENTRY: u32 = 0x8000_0000;
    pub const DATA_ADDR: u32 = 0x8000_2000;

    fn push_u16(out: &mut Vec<u8>, v: u16) {
        out.extend_from_slice(&v.to_le_bytes());
    }

    fn push_u32(out: &mut Vec<u8>, v: u32) {
        out.extend_from_slice(&v.to_le_bytes());
    }

    /// Section header with no link/info, alignment 1 and no entries
    fn push_shdr(out: &mut Vec<u8>, [name, ty, flags, addr, off, size]: [u32; 6]) {
        for v in [name, ty, flags, addr, off, size, 0, 0, 1, 0] {
            push_u32(out, v);
        }
    }

    /// A little-endian ELF32 executable for `machine`
    pub fn image(machine: u16) -> Vec<u8> {
        let mut out = Vec::new();

        // e_ident: magic, ELFCLASS32, ELFDATA2LSB, EV_CURRENT
        out.extend_from_slice(&[0x7f, b'E', b'L', b'F', 1, 1, 1, 0]);
        out.extend_from_slice(&[0; 8]);
        push_u16(&mut out, 2); // ET_EXEC
        push_u16(&mut out, machine);
        push_u32(&mut out, 1);
        push_u32(&mut out, ENTRY);
        push_u32(&mut out, 0); // no program headers
        push_u32(&mut out, SHDR_OFFSET as u32);
        push_u32(&mut out, 0);
        push_u16(&mut out, EHDR_SIZE as u16);
        push_u16(&mut out, 32);
        push_u16(&mut out, 0);
        push_u16(&mut out, SHDR_SIZE as u16);
        push_u16(&mut out, 3);
        push_u16(&mut out, 1); // .shstrtab
        assert_eq!(out.len(), EHDR_SIZE);

        out.extend_from_slice(SHSTRTAB);
        out.resize(DATA_OFFSET, 0);
        out.extend_from_slice(&[0xef, 0xbe, 0xad, 0xde]);
        out.resize(SHDR_OFFSET, 0);

        push_shdr(&mut out, [0; 6]);
        // SHT_STRTAB
        push_shdr(&mut out, [1, 3, 0, 0, EHDR_SIZE as u32, SHSTRTAB.len() as u32]);
        // SHT_PROGBITS, SHF_WRITE | SHF_ALLOC
        push_shdr(&mut out, [11, 1, 3, DATA_ADDR, DATA_OFFSET as u32, DATA_SIZE as u32]);
        out
    }

    pub fn riscv() -> Vec<u8> {
        image(EM_RISCV)
    }
}
