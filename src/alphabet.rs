//! Remapping of byte texts to dense alphabets.
//!
//! Index construction wants symbols drawn from a small, dense range with
//! code 0 reserved for the sentinel. An [`Alphabet`] is trained on a text
//! and then maps between raw bytes and codes `1..len()`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The number of distinct byte values.
const NO_BYTES: usize = 256;

/// A bijective mapping between the bytes occurring in a text and the
/// dense codes `1..len()`, with 0 reserved for the sentinel.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "AlphabetRepr", into = "AlphabetRepr")]
pub struct Alphabet {
    size: usize,
    map: [u8; NO_BYTES],
    revmap: [u8; NO_BYTES],
}

/// Serialized form of an [`Alphabet`]: the forward map alone, from
/// which the size and the reverse map are rebuilt.
#[derive(Serialize, Deserialize)]
struct AlphabetRepr {
    map: Vec<u8>,
}

impl From<Alphabet> for AlphabetRepr {
    fn from(alpha: Alphabet) -> Self {
        AlphabetRepr {
            map: alpha.map.to_vec(),
        }
    }
}

impl From<AlphabetRepr> for Alphabet {
    fn from(repr: AlphabetRepr) -> Self {
        let mut map = [0u8; NO_BYTES];
        let mut revmap = [0u8; NO_BYTES];
        let mut size = 1;
        for (b, &code) in repr.map.iter().take(NO_BYTES).enumerate() {
            map[b] = code;
            if code != 0 {
                revmap[code as usize] = b as u8;
                size += 1;
            }
        }
        Alphabet { size, map, revmap }
    }
}

impl Alphabet {
    /// Train an alphabet on `text`.
    ///
    /// Codes are assigned in ascending byte order starting at 1. The text
    /// must not contain the byte 0; that value is the sentinel and is
    /// appended by the mapping operations, not written by the caller.
    pub fn new(text: &[u8]) -> Result<Self> {
        let mut map = [0u8; NO_BYTES];
        let mut revmap = [0u8; NO_BYTES];

        for &b in text {
            if b == 0 {
                return Err(Error::Mapping { byte: 0 });
            }
            map[b as usize] = 1;
        }

        let mut size = 1;
        for b in 1..NO_BYTES {
            if map[b] != 0 {
                map[b] = size as u8;
                revmap[size] = b as u8;
                size += 1;
            }
        }

        Ok(Alphabet { size, map, revmap })
    }

    /// The alphabet size σ: the number of distinct symbols in the
    /// training text plus one for the sentinel.
    pub fn len(&self) -> usize {
        self.size
    }

    /// The code for byte `b`, or 0 if `b` is not in the alphabet.
    pub fn code(&self, b: u8) -> u8 {
        self.map[b as usize]
    }

    /// The byte for code `c`, or 0 for the sentinel and unused codes.
    pub fn byte(&self, c: u8) -> u8 {
        self.revmap[c as usize]
    }

    /// Map `src` into `dst` byte for byte. `dst` must have the same
    /// length as `src`; byte 0 maps to the sentinel code 0.
    pub fn map_to_bytes(&self, dst: &mut [u8], src: &[u8]) -> Result<()> {
        if dst.len() != src.len() {
            return Err(Error::Size {
                expected: src.len(),
                actual: dst.len(),
            });
        }
        for (d, &b) in dst.iter_mut().zip(src.iter()) {
            *d = self.map_byte(b)?;
        }
        Ok(())
    }

    /// Map `src` into the integer slice `dst`, appending the sentinel.
    /// `dst` must be one entry longer than `src`.
    pub fn map_to_ints(&self, dst: &mut [u32], src: &[u8]) -> Result<()> {
        if dst.len() != src.len() + 1 {
            return Err(Error::Size {
                expected: src.len() + 1,
                actual: dst.len(),
            });
        }
        for (d, &b) in dst.iter_mut().zip(src.iter()) {
            *d = self.map_byte(b)? as u32;
        }
        dst[src.len()] = 0;
        Ok(())
    }

    /// Map codes in `src` back to the original bytes. `dst` must have the
    /// same length as `src`; the sentinel code 0 maps back to byte 0.
    pub fn revmap_to_bytes(&self, dst: &mut [u8], src: &[u8]) -> Result<()> {
        if dst.len() != src.len() {
            return Err(Error::Size {
                expected: src.len(),
                actual: dst.len(),
            });
        }
        for (d, &c) in dst.iter_mut().zip(src.iter()) {
            let b = self.revmap[c as usize];
            if b == 0 && c != 0 {
                return Err(Error::Mapping { byte: c });
            }
            *d = b;
        }
        Ok(())
    }

    /// Allocate the sentinel-terminated coded byte text for `src`.
    ///
    /// The result has length `src.len() + 1` and ends with 0. This is the
    /// input form the suffix trees, the BWT and the binary-search matcher
    /// work on.
    pub fn mapped_bytes(&self, src: &[u8]) -> Result<Vec<u8>> {
        let mut dst = vec![0u8; src.len() + 1];
        self.map_to_bytes(&mut dst[..src.len()], src)?;
        Ok(dst)
    }

    /// Allocate the sentinel-terminated coded integer text for `src`.
    ///
    /// The result has length `src.len() + 1` and ends with 0. This is the
    /// input form the suffix array constructions work on.
    pub fn mapped_ints(&self, src: &[u8]) -> Result<Vec<u32>> {
        let mut dst = vec![0u32; src.len() + 1];
        self.map_to_ints(&mut dst, src)?;
        Ok(dst)
    }

    fn map_byte(&self, b: u8) -> Result<u8> {
        let code = self.map[b as usize];
        if code == 0 && b != 0 {
            return Err(Error::Mapping { byte: b });
        }
        Ok(code)
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut m = f.debug_map();
        for b in 0..NO_BYTES {
            if self.map[b] != 0 {
                m.entry(&(b as u8 as char), &self.map[b]);
            }
        }
        m.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foobar_codes() {
        let alpha = Alphabet::new(b"foobar").unwrap();
        assert_eq!(alpha.len(), 6);
        assert_eq!(alpha.code(b'a'), 1);
        assert_eq!(alpha.code(b'b'), 2);
        assert_eq!(alpha.code(b'f'), 3);
        assert_eq!(alpha.code(b'o'), 4);
        assert_eq!(alpha.code(b'r'), 5);
        for c in 1..6 {
            assert_eq!(alpha.code(alpha.byte(c)), c);
        }
    }

    #[test]
    fn test_unmapped_byte_is_error() {
        let alpha = Alphabet::new(b"foobar").unwrap();
        let mut dst = vec![0u8; 3];
        assert_eq!(
            alpha.map_to_bytes(&mut dst, b"qux"),
            Err(Error::Mapping { byte: b'q' })
        );
        assert_eq!(
            alpha.mapped_ints(b"qux").unwrap_err(),
            Error::Mapping { byte: b'q' }
        );
    }

    #[test]
    fn test_size_mismatch() {
        let alpha = Alphabet::new(b"ab").unwrap();
        let mut dst = vec![0u8; 1];
        assert_eq!(
            alpha.map_to_bytes(&mut dst, b"ab"),
            Err(Error::Size {
                expected: 2,
                actual: 1
            })
        );
        let mut ints = vec![0u32; 2];
        assert_eq!(
            alpha.map_to_ints(&mut ints, b"ab"),
            Err(Error::Size {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_int_mapping_appends_sentinel() {
        let alpha = Alphabet::new(b"mississippi").unwrap();
        let x = alpha.mapped_ints(b"mississippi").unwrap();
        assert_eq!(x, vec![2, 1, 4, 4, 1, 4, 4, 1, 3, 3, 1, 0]);
    }

    #[test]
    fn test_zero_byte_rejected() {
        assert_eq!(
            Alphabet::new(b"a\0b").unwrap_err(),
            Error::Mapping { byte: 0 }
        );
    }

    #[test]
    fn test_revmap_round_trip() {
        let text = b"the quick brown fox";
        let alpha = Alphabet::new(text).unwrap();
        let mut coded = vec![0u8; text.len()];
        alpha.map_to_bytes(&mut coded, text).unwrap();
        let mut back = vec![0u8; text.len()];
        alpha.revmap_to_bytes(&mut back, &coded).unwrap();
        assert_eq!(&back, text);
    }

    #[test]
    fn test_revmap_unused_code_is_error() {
        let alpha = Alphabet::new(b"ab").unwrap();
        let mut dst = vec![0u8; 1];
        assert_eq!(
            alpha.revmap_to_bytes(&mut dst, &[7]),
            Err(Error::Mapping { byte: 7 })
        );
    }
}
