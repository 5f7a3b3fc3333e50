//! Preprocessing for Li–Durbin style read mapping.
//!
//! Approximate search in the style of Li & Durbin's BWA interleaves
//! backward-search steps over the BWT of the text with steps over the
//! BWT of the reversed text. This module builds everything those
//! traversals need: the alphabet, the suffix array, the C-table (which
//! is direction-independent) and an O-table per direction.

use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::bwt::{bwt, CTable, OTable};
use crate::error::Result;
use crate::heap_size::HeapSize;
use crate::suffix_array::sais;

/// The index bundle consumed by Li–Durbin style search backends.
#[derive(Clone, Serialize, Deserialize)]
pub struct LiDurbin {
    alpha: Alphabet,
    sa: Vec<usize>,
    ctab: CTable,
    otab: OTable,
    rotab: OTable,
}

impl LiDurbin {
    /// Build the bundle for a raw byte text.
    ///
    /// The reversed direction is processed first so that the suffix
    /// array kept in the bundle is the forward one. Only the part of
    /// the text before the sentinel is reversed; the sentinel stays
    /// terminal in both directions.
    pub fn preprocess(text: &[u8]) -> Result<LiDurbin> {
        let alpha = Alphabet::new(text)?;
        let mut ints = alpha.mapped_ints(text)?;
        let mut bytes = alpha.mapped_bytes(text)?;
        let n = text.len();

        ints[..n].reverse();
        bytes[..n].reverse();
        let rsa = sais(&ints, &alpha);
        let rbwt = bwt(&bytes, &rsa);
        let ctab = CTable::build(&rbwt, alpha.len());
        let rotab = OTable::build(&rbwt, &ctab);

        ints[..n].reverse();
        bytes[..n].reverse();
        let sa = sais(&ints, &alpha);
        let fbwt = bwt(&bytes, &sa);
        let otab = OTable::build(&fbwt, &ctab);

        Ok(LiDurbin {
            alpha,
            sa,
            ctab,
            otab,
            rotab,
        })
    }

    /// The alphabet the text was coded with.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alpha
    }

    /// The suffix array of the (forward) text.
    pub fn suffix_array(&self) -> &[usize] {
        &self.sa
    }

    /// The C-table, shared by both directions.
    pub fn c_table(&self) -> &CTable {
        &self.ctab
    }

    /// The O-table over the forward BWT.
    pub fn o_table(&self) -> &OTable {
        &self.otab
    }

    /// The O-table over the BWT of the reversed text.
    pub fn rev_o_table(&self) -> &OTable {
        &self.rotab
    }
}

impl HeapSize for LiDurbin {
    fn heap_size(&self) -> usize {
        self.sa.len() * std::mem::size_of::<usize>()
            + self.ctab.heap_size()
            + self.otab.heap_size()
            + self.rotab.heap_size()
    }
}
