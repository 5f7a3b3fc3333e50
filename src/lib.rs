//! Classic string indexes over byte texts: suffix arrays (skew and
//! SA-IS), suffix trees (naive and McCreight), the Burrows–Wheeler
//! transform with backward search, and online matchers, all reporting
//! occurrences through one [`ExactMatcher`] contract.
//!
//! A text is first remapped to a dense alphabet with code 0 reserved
//! for the terminal sentinel:
//!
//! ```
//! use strindex::{Alphabet, ExactMatcher, SuffixTree};
//!
//! let text = b"mississippi";
//! let alpha = Alphabet::new(text).unwrap();
//! let coded = alpha.mapped_bytes(text).unwrap();
//!
//! let st = SuffixTree::mccreight(&alpha, &coded);
//! let positions: Vec<usize> = st.search_bytes(b"ss").matches().collect();
//! assert_eq!(positions, vec![5, 2]);
//! ```
//!
//! The suffix arrays and the BWT tables work on the same coded form:
//!
//! ```
//! use strindex::bwt::{backward_search, bwt, CTable, OTable};
//! use strindex::{suffix_array, Alphabet};
//!
//! let text = b"mississippi";
//! let alpha = Alphabet::new(text).unwrap();
//! let ints = alpha.mapped_ints(text).unwrap();
//! let coded = alpha.mapped_bytes(text).unwrap();
//!
//! let sa = suffix_array::sais(&ints, &alpha);
//! assert_eq!(sa, suffix_array::skew(&ints, &alpha));
//!
//! let b = bwt(&coded, &sa);
//! let ctab = CTable::build(&b, alpha.len());
//! let otab = OTable::build(&b, &ctab);
//! let pattern = alpha.mapped_bytes(b"is").unwrap();
//! assert_eq!(backward_search(&ctab, &otab, &pattern[..2]), 3..5);
//! ```
#![allow(clippy::len_without_is_empty)]

pub mod alphabet;
pub mod bitvec;
pub mod bwt;
pub mod error;
pub mod exact;
pub mod heap_size;
pub mod li_durbin;
pub mod matcher;
pub mod suffix_array;
pub mod suffix_tree;
#[cfg(test)]
mod testutil;

pub use crate::alphabet::Alphabet;
pub use crate::bitvec::BitVec;
pub use crate::error::{Error, Result};
pub use crate::exact::{ba_matcher, kmp_matcher, naive_matcher};
pub use crate::heap_size::HeapSize;
pub use crate::li_durbin::LiDurbin;
pub use crate::matcher::ExactMatcher;
pub use crate::suffix_array::sa_bsearch;
pub use crate::suffix_tree::SuffixTree;
