use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::transform::DIGEST_LEN;
use crate::CrackError;

/// Ordered set of distinct characters candidates are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from a string. Rejects an empty string and
    /// repeated characters.
    pub fn new(chars: &str) -> Result<Self, CrackError> {
        if chars.is_empty() {
            return Err(CrackError::invalid("alphabet is empty"));
        }
        let mut seen = HashSet::new();
        for c in chars.chars() {
            if !seen.insert(c) {
                return Err(CrackError::invalid(format!(
                    "alphabet contains '{c}' more than once"
                )));
            }
        }
        Ok(Self {
            chars: chars.chars().collect(),
        })
    }

    /// Keep the first occurrence of every character.
    pub(crate) fn dedup(chars: &str) -> Self {
        let mut seen = HashSet::new();
        Self {
            chars: chars.chars().filter(|c| seen.insert(*c)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Digit value of `c`, if it belongs to the alphabet.
    pub fn position(&self, c: char) -> Option<usize> {
        self.chars.iter().position(|&x| x == c)
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Alphabet {
    type Err = CrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alphabet::new(s)
    }
}

/// Immutable description of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParameters {
    target: [u8; DIGEST_LEN],
    salt: String,
    length: usize,
    alphabet: Alphabet,
}

impl SearchParameters {
    /// Validate and normalise search inputs.
    ///
    /// The target digest is trimmed and lowercased, then must consist of
    /// exactly 64 hex digits. The salt is used verbatim.
    pub fn new(
        target_digest: &str,
        salt: impl Into<String>,
        length: usize,
        alphabet: Alphabet,
    ) -> Result<Self, CrackError> {
        let target = parse_target(target_digest)?;
        if length < 1 {
            return Err(CrackError::invalid("length must be at least 1"));
        }
        if alphabet.is_empty() {
            return Err(CrackError::invalid("alphabet is empty"));
        }
        Ok(Self {
            target,
            salt: salt.into(),
            length,
            alphabet,
        })
    }

    pub fn target(&self) -> &[u8; DIGEST_LEN] {
        &self.target
    }

    /// Target digest as lowercase hex.
    pub fn target_hex(&self) -> String {
        hex::encode(self.target)
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

fn parse_target(digest: &str) -> Result<[u8; DIGEST_LEN], CrackError> {
    let normalized = digest.trim().to_ascii_lowercase();
    if normalized.len() != DIGEST_LEN * 2 {
        return Err(CrackError::invalid(format!(
            "target digest must be {} hex characters, got {}",
            DIGEST_LEN * 2,
            normalized.len()
        )));
    }
    if !normalized.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CrackError::invalid(
            "target digest must contain only hex digits",
        ));
    }
    let mut out = [0u8; DIGEST_LEN];
    hex::decode_to_slice(&normalized, &mut out)
        .map_err(|e| CrackError::invalid(format!("target digest: {e}")))?;
    Ok(out)
}
