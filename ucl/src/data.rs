// data.rs - Data pass over `objdump -s` output
//
// Each full hex-dump row (address plus four words) becomes four `dmem`
// assumptions. Rows are matched with exact single-space separators so that
// padded short rows and the trailing ASCII column can never be read as words.

use crate::elf::DATA_SECTION;
use log::trace;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const CONTENTS_HEADER: &str = "Contents of section ";

fn data_row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^([0-9a-fA-F]{8}) ([0-9a-fA-F]{8}) ([0-9a-fA-F]{8}) ([0-9a-fA-F]{8}) ([0-9a-fA-F]{8})",
            r"(?:\s{2,}.*)?$"
        ))
        .expect("valid regex")
    })
}

/// One initialized data word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataWord {
    pub word: u32,
    pub value: u32,
}

impl fmt::Display for DataWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "assume (dmem[0x{:X}bv30] == 0x{:08X}bv32);",
            self.word, self.value
        )
    }
}

/// Parse one trimmed hex-dump row into its four words
pub fn parse_row(line: &str) -> Option<[DataWord; 4]> {
    let caps = data_row_re().captures(line)?;
    let start = u32::from_str_radix(&caps[1], 16).ok()? >> 2;

    let mut words = [DataWord { word: 0, value: 0 }; 4];
    for (i, slot) in words.iter_mut().enumerate() {
        *slot = DataWord {
            word: start.checked_add(i as u32)?,
            value: u32::from_str_radix(&caps[i + 2], 16).ok()?,
        };
    }
    Some(words)
}

/// Parse `objdump -s` output for the data section
pub fn parse(dump: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut in_contents = false;

    for line in dump.lines() {
        let line = line.trim();

        if let Some(name) = line.strip_prefix(CONTENTS_HEADER) {
            in_contents = name.trim_end_matches(':') == DATA_SECTION;
            continue;
        }
        if !in_contents {
            continue;
        }

        match parse_row(line) {
            Some(words) => lines.extend(words.iter().map(DataWord::to_string)),
            None => trace!("skipping data row: {:?}", line),
        }
    }

    lines
}
