// text.rs - Instruction pass over `objdump -d` output
//
// Turns each listed instruction of the code section into an `imem`
// assumption, keeps other listing lines (labels) as comments, and closes the
// list with the default-fill assumption for every other address.

use crate::elf::{DATA_SECTION, TEXT_SECTION};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const SECTION_HEADER: &str = "Disassembly of section ";

/// `<8-hex addr>:<ws><8-hex word><ws><rest>`
fn text_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-9a-fA-F]{8}):\s+([0-9a-fA-F]{8})\s+(.*)$").expect("valid regex")
    })
}

/// One listed instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Address in 4-byte words
    pub word: u32,
    /// Raw encoding
    pub bits: u32,
    /// Normalized disassembly text
    pub comment: String,
}

impl Instruction {
    /// Parse a trimmed listing line; `None` if it is not an instruction
    pub fn parse(line: &str) -> Option<Self> {
        let caps = text_line_re().captures(line)?;
        let addr = u32::from_str_radix(&caps[1], 16).ok()?;
        let bits = u32::from_str_radix(&caps[2], 16).ok()?;
        Some(Self {
            word: addr >> 2,
            bits,
            comment: normalize_comment(&caps[3]),
        })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "assume (imem[0x{:X}bv30] == 0x{:08X}bv32); // {}",
            self.word, self.bits, self.comment
        )
    }
}

/// Trim, turn tabs into spaces and put a space after every comma
fn normalize_comment(rest: &str) -> String {
    rest.trim().replace('\t', " ").replace(',', ", ")
}

/// Every word outside the loaded program holds a NOP
pub fn default_fill(instruction_count: usize) -> String {
    format!(
        "assume (forall (a : mem_word_addr_t) :: (a < IMEM_PC_START || a >= IMEM_PC_START + {}bv30) ==> imem[a] == instructions.NOP);",
        instruction_count
    )
}

/// Result of the instruction pass
#[derive(Debug, Clone, Default)]
pub struct TextListing {
    /// Assumptions and comments in listing order, closed by the default fill
    pub lines: Vec<String>,
    pub instruction_count: usize,
    /// A `.data` section header was seen
    pub has_data: bool,
}

/// Parse `objdump -d` output
pub fn parse(listing: &str) -> TextListing {
    let mut out = TextListing::default();
    let mut section = "";

    for line in listing.lines() {
        let line = line.trim();

        if let Some(header) = line.strip_prefix(SECTION_HEADER) {
            let name = header.split_whitespace().last().unwrap_or("");
            section = name.strip_suffix(':').unwrap_or(name);
            if section == DATA_SECTION {
                out.has_data = true;
            }
            continue;
        }

        if section != TEXT_SECTION {
            continue;
        }

        if let Some(inst) = Instruction::parse(line) {
            out.lines.push(inst.to_string());
            out.instruction_count += 1;
        } else if !line.is_empty() {
            out.lines.push(format!("// {}", line));
        }
    }

    out.lines.push(default_fill(out.instruction_count));
    out
}
