//! Mapping between enumeration indices and candidate strings.
//!
//! Candidates of a fixed length are enumerated in mixed-radix order with the
//! alphabet as digit set, most significant digit first. Index 0 is the first
//! alphabet character repeated `length` times, the last index is the last
//! character repeated. Scanning indices in increasing order is odometer
//! order: the rightmost character turns fastest.
use crate::params::Alphabet;
use crate::CrackError;

/// All candidates of one length over one alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpace {
    alphabet: Alphabet,
    length: usize,
    size: u64,
}

impl SearchSpace {
    /// Returns the space of `alphabet^length` candidates.
    ///
    /// The size is computed with checked arithmetic. A space larger than
    /// `max_space` (or than `u64::MAX`) is refused.
    pub fn new(alphabet: &Alphabet, length: usize, max_space: u64) -> Result<Self, CrackError> {
        if length < 1 {
            return Err(CrackError::invalid("length must be at least 1"));
        }
        if alphabet.is_empty() {
            return Err(CrackError::invalid("alphabet is empty"));
        }
        let size = space_size(alphabet.len(), length)
            .filter(|&s| s <= max_space as u128)
            .ok_or_else(|| {
                CrackError::invalid(format!(
                    "search space {}^{} exceeds the limit of {} candidates",
                    alphabet.len(),
                    length,
                    max_space
                ))
            })?;
        Ok(Self {
            alphabet: alphabet.clone(),
            length,
            size: size as u64,
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Candidate string at `index`.
    pub fn decode(&self, index: u64) -> Result<String, CrackError> {
        let mut out = String::with_capacity(self.length);
        self.decode_into(index, &mut out)?;
        Ok(out)
    }

    /// Write the candidate at `index` into `out`, replacing its contents.
    pub fn decode_into(&self, index: u64, out: &mut String) -> Result<(), CrackError> {
        let mut digits = vec![0usize; self.length];
        self.digits_of(index, &mut digits)?;
        render(&self.alphabet, &digits, out);
        Ok(())
    }

    /// Index of `candidate`, or `None` if it is not part of this space.
    pub fn encode(&self, candidate: &str) -> Option<u64> {
        let base = self.alphabet.len() as u64;
        let mut index = 0u64;
        let mut count = 0usize;
        for c in candidate.chars() {
            let digit = self.alphabet.position(c)? as u64;
            index = index.checked_mul(base)?.checked_add(digit)?;
            count += 1;
        }
        (count == self.length).then_some(index)
    }

    fn digits_of(&self, index: u64, digits: &mut [usize]) -> Result<(), CrackError> {
        if index >= self.size {
            return Err(CrackError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        let base = self.alphabet.len() as u64;
        let mut rest = index;
        for slot in digits.iter_mut().rev() {
            *slot = (rest % base) as usize;
            rest /= base;
        }
        Ok(())
    }

    /// A cursor positioned at `index`.
    pub fn cursor(&self, index: u64) -> Result<Cursor<'_>, CrackError> {
        let mut cursor = Cursor {
            space: self,
            digits: vec![0; self.length],
            index,
            text: String::with_capacity(self.length * 4),
        };
        cursor.seek(index)?;
        Ok(cursor)
    }
}

/// `base^length` as `u128`, or `None` on overflow.
pub fn space_size(base: usize, length: usize) -> Option<u128> {
    let exp = u32::try_from(length).ok()?;
    (base as u128).checked_pow(exp)
}

/// Decode `index` into the candidate of `length` characters over `alphabet`.
pub fn decode(index: u64, length: usize, alphabet: &Alphabet) -> Result<String, CrackError> {
    SearchSpace::new(alphabet, length, u64::MAX)?.decode(index)
}

fn render(alphabet: &Alphabet, digits: &[usize], out: &mut String) {
    let chars = alphabet.as_slice();
    out.clear();
    out.extend(digits.iter().map(|&d| chars[d]));
}

/// Walks a search space in odometer order without dividing per step.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    space: &'a SearchSpace,
    digits: Vec<usize>,
    index: u64,
    text: String,
}

impl<'a> Cursor<'a> {
    /// Jump to `index`.
    pub fn seek(&mut self, index: u64) -> Result<(), CrackError> {
        self.space.digits_of(index, &mut self.digits)?;
        self.index = index;
        render(&self.space.alphabet, &self.digits, &mut self.text);
        Ok(())
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    /// Candidate at the current index.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Step to the next index. Returns `false` once the last candidate has
    /// been passed; the cursor then wraps to index 0's digits and must be
    /// re-seeked before use.
    pub fn advance(&mut self) -> bool {
        let base = self.space.alphabet.len();
        self.index += 1;
        for slot in self.digits.iter_mut().rev() {
            *slot += 1;
            if *slot < base {
                render(&self.space.alphabet, &self.digits, &mut self.text);
                return true;
            }
            *slot = 0;
        }
        render(&self.space.alphabet, &self.digits, &mut self.text);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(chars: &str, length: usize) -> SearchSpace {
        SearchSpace::new(&Alphabet::new(chars).unwrap(), length, u64::MAX).unwrap()
    }

    #[test]
    fn basic_indices() {
        let s = space("ab", 2);
        assert_eq!(s.size(), 4);
        assert_eq!(s.decode(0).unwrap(), "aa");
        assert_eq!(s.decode(1).unwrap(), "ab");
        assert_eq!(s.decode(2).unwrap(), "ba");
        assert_eq!(s.decode(3).unwrap(), "bb");
    }

    #[test]
    fn decode_past_end_fails() {
        let s = space("ab", 2);
        assert!(matches!(
            s.decode(4),
            Err(CrackError::IndexOutOfRange { index: 4, size: 4 })
        ));
    }

    #[test]
    fn encode_inverts_decode() {
        let s = space("xyz", 3);
        assert_eq!(s.encode("xxx"), Some(0));
        assert_eq!(s.encode("zzz"), Some(26));
        assert_eq!(s.encode("yxz"), Some(9 + 2));
        assert_eq!(s.encode("xx"), None);
        assert_eq!(s.encode("xxa"), None);
    }

    #[test]
    fn cursor_matches_decode() {
        let s = space("a1Z", 3);
        let mut cursor = s.cursor(5).unwrap();
        for index in 5..s.size() {
            assert_eq!(cursor.index(), index);
            assert_eq!(cursor.as_str(), s.decode(index).unwrap());
            let more = cursor.advance();
            assert_eq!(more, index + 1 < s.size());
        }
    }

    #[test]
    fn overflow_is_refused() {
        let alpha = Alphabet::new("0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ")
            .unwrap();
        assert!(SearchSpace::new(&alpha, 10, u64::MAX).is_ok());
        assert!(matches!(
            SearchSpace::new(&alpha, 12, u64::MAX),
            Err(CrackError::InvalidParameters(_))
        ));
        assert!(SearchSpace::new(&alpha, 3, 1000).is_err());
    }

    #[test]
    fn space_size_checks_overflow() {
        assert_eq!(space_size(62, 12), Some(3_226_266_762_397_899_821_056));
        assert_eq!(space_size(2, 128), None);
        assert_eq!(space_size(1, usize::MAX), None);
    }
}
