//! The Burrows–Wheeler transform and the rank tables that power
//! backward search.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::heap_size::HeapSize;

/// Compute the BWT of the sentinel-terminated coded text `text` from its
/// suffix array: the symbol preceding each suffix, with the sentinel for
/// the suffix starting at 0.
pub fn bwt(text: &[u8], sa: &[usize]) -> Vec<u8> {
    sa.iter()
        .map(|&p| if p == 0 { 0 } else { text[p - 1] })
        .collect()
}

/// For each code `c`, the number of symbols in the text strictly
/// smaller than `c`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CTable {
    cumsum: Vec<usize>,
}

impl CTable {
    /// Count the symbols of `bwt` (equivalently, of the text) and take
    /// exclusive prefix sums over the `sigma` codes.
    pub fn build(bwt: &[u8], sigma: usize) -> CTable {
        let mut cumsum = vec![0; sigma];
        for &c in bwt {
            cumsum[c as usize] += 1;
        }
        let mut acc = 0;
        for s in cumsum.iter_mut() {
            let k = *s;
            *s = acc;
            acc += k;
        }
        CTable { cumsum }
    }

    /// The number of symbols smaller than `c`.
    pub fn rank(&self, c: u8) -> usize {
        self.cumsum[c as usize]
    }

    /// The alphabet size σ.
    pub fn len(&self) -> usize {
        self.cumsum.len()
    }
}

/// For each code `c` and position `i`, the number of occurrences of `c`
/// in `BWT[0..i)`.
///
/// Stored row-major with one σ-independent row per code; the cell at
/// `(c, i)` holds the count over `BWT[0..=i]`, so the all-zero column
/// for `i = 0` is never materialised.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OTable {
    sigma: usize,
    n: usize,
    table: Vec<usize>,
}

impl OTable {
    /// Accumulate occurrence counts over `bwt` for every code of `ctab`.
    pub fn build(bwt: &[u8], ctab: &CTable) -> OTable {
        let sigma = ctab.len();
        let n = bwt.len();
        let mut table = vec![0; sigma * n];
        for c in 0..sigma {
            let row = &mut table[c * n..(c + 1) * n];
            let mut acc = 0;
            for (cell, &b) in row.iter_mut().zip(bwt.iter()) {
                acc += (b as usize == c) as usize;
                *cell = acc;
            }
        }
        OTable { sigma, n, table }
    }

    /// The number of occurrences of `c` in `BWT[0..i)`.
    pub fn rank(&self, c: u8, i: usize) -> usize {
        debug_assert!((c as usize) < self.sigma);
        if i == 0 {
            return 0;
        }
        self.table[c as usize * self.n + i - 1]
    }

    /// The length of the underlying BWT string.
    pub fn len(&self) -> usize {
        self.n
    }
}

impl HeapSize for CTable {
    fn heap_size(&self) -> usize {
        self.cumsum.len() * std::mem::size_of::<usize>()
    }
}

impl HeapSize for OTable {
    fn heap_size(&self) -> usize {
        self.table.len() * std::mem::size_of::<usize>()
    }
}

/// Backward search for the coded `pattern`, yielding the half-open block
/// `[L, R)` of the suffix array whose suffixes start with the pattern.
///
/// The empty pattern yields the whole array; a pattern the text cannot
/// contain yields an empty block.
pub fn backward_search(ctab: &CTable, otab: &OTable, pattern: &[u8]) -> Range<usize> {
    let mut left = 0;
    let mut right = otab.len();
    for &a in pattern.iter().rev() {
        left = ctab.rank(a) + otab.rank(a, left);
        right = ctab.rank(a) + otab.rank(a, right);
        if left >= right {
            return 0..0;
        }
    }
    left..right
}
