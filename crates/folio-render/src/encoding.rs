//! # Output Charsets
//!
//! Checks that text can be written with the page's font encoding before any
//! of it is drawn.
//!
//! Standard PDF core fonts only cover WinAnsi (Windows-1252). A name with a
//! character outside that set must fail loudly instead of printing garbage.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters Windows-1252 places in 0x80..=0x9F, where Latin-1 has controls.
const CP1252_EXTRAS: &[char] = &[
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '\u{2018}', '\u{2019}',
    '\u{201C}', '\u{201D}', '•', '–', '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// The character set the output font can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    /// Any Unicode scalar (embedded TrueType fonts).
    Unicode,
    /// Windows-1252, the encoding of the standard PDF core fonts.
    #[default]
    WinAnsi,
}

/// A character the output charset cannot represent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("character {ch:?} (U+{code:04X}) is not representable in {charset}", code = code_point(.ch))]
pub struct EncodeError {
    pub ch: char,
    pub charset: Charset,
}

fn code_point(ch: &char) -> u32 {
    *ch as u32
}

impl Charset {
    /// Returns true if `ch` can be written in this charset.
    pub fn supports(&self, ch: char) -> bool {
        match self {
            Charset::Unicode => true,
            Charset::WinAnsi => {
                let code = ch as u32;
                code < 0x80 || (0xA0..=0xFF).contains(&code) || CP1252_EXTRAS.contains(&ch)
            }
        }
    }

    /// Returns the text unchanged if every character is representable.
    pub fn encode(&self, text: &str) -> Result<String, EncodeError> {
        match text.chars().find(|c| !self.supports(*c)) {
            Some(ch) => Err(EncodeError { ch, charset: *self }),
            None => Ok(text.to_string()),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Charset::Unicode => write!(f, "unicode"),
            Charset::WinAnsi => write!(f, "win_ansi"),
        }
    }
}

impl FromStr for Charset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unicode" | "utf8" | "utf-8" => Ok(Charset::Unicode),
            "win_ansi" | "winansi" | "cp1252" => Ok(Charset::WinAnsi),
            _ => Err(format!("Unknown charset: {}", s)),
        }
    }
}
