//! Preset character sets and the rule for combining several of them into a
//! single alphabet.
//!
//! Presets are considered in a fixed canonical order regardless of the order
//! they were selected in. `Letters` and `Alphanumeric` are complete sets on
//! their own: reaching either one replaces whatever was collected so far and
//! ends the walk. The others are concatenated. With nothing selected the
//! lowercase set is used.

use std::fmt;
use std::str::FromStr;

use crate::params::Alphabet;
use crate::CrackError;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
/// ASCII punctuation in code point order.
pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Charset {
    Lower,
    Upper,
    Digits,
    All,
    Letters,
    Alphanumeric,
}

impl Charset {
    /// Every preset in canonical order.
    pub const ALL: [Charset; 6] = [
        Charset::Lower,
        Charset::Upper,
        Charset::Digits,
        Charset::All,
        Charset::Letters,
        Charset::Alphanumeric,
    ];

    pub fn chars(self) -> String {
        match self {
            Charset::Lower => LOWERCASE.to_string(),
            Charset::Upper => UPPERCASE.to_string(),
            Charset::Digits => DIGITS.to_string(),
            Charset::All => [LOWERCASE, UPPERCASE, DIGITS, PUNCTUATION].concat(),
            Charset::Letters => [LOWERCASE, UPPERCASE].concat(),
            Charset::Alphanumeric => [LOWERCASE, UPPERCASE, DIGITS].concat(),
        }
    }

    fn is_exclusive(self) -> bool {
        matches!(self, Charset::Letters | Charset::Alphanumeric)
    }

    pub fn name(self) -> &'static str {
        match self {
            Charset::Lower => "lower",
            Charset::Upper => "upper",
            Charset::Digits => "digits",
            Charset::All => "all",
            Charset::Letters => "letters",
            Charset::Alphanumeric => "alnum",
        }
    }

    /// Combine a selection of presets into one alphabet.
    pub fn compose(selected: &[Charset]) -> Alphabet {
        let mut collected = String::new();
        for preset in Charset::ALL {
            if !selected.contains(&preset) {
                continue;
            }
            if preset.is_exclusive() {
                collected = preset.chars();
                break;
            }
            collected.push_str(&preset.chars());
        }
        if collected.is_empty() {
            collected = Charset::Lower.chars();
        }
        Alphabet::dedup(&collected)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = CrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lower" => Ok(Charset::Lower),
            "upper" => Ok(Charset::Upper),
            "digits" | "0-9" => Ok(Charset::Digits),
            "all" => Ok(Charset::All),
            "letters" => Ok(Charset::Letters),
            "alnum" | "alphanumeric" => Ok(Charset::Alphanumeric),
            other => Err(CrackError::invalid(format!(
                "unknown charset '{other}' (expected lower, upper, digits, all, letters or alnum)"
            ))),
        }
    }
}
