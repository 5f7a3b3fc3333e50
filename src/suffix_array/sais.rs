//! Suffix array construction with SA-IS (induced sorting):
//!    Nong, Ge; Zhang, Sen & Chan, Wai Hong (2009). Linear Suffix Array
//!    Construction by Almost Pure Induced-Sorting. DCC 2009, 193–202.

use crate::alphabet::Alphabet;
use crate::bitvec::BitVec;

const UNDEF: usize = usize::MAX;

pub(crate) fn count_symbols(x: &[u32], sigma: usize) -> Vec<usize> {
    let mut occs = vec![0; sigma];
    for &c in x {
        occs[c as usize] += 1;
    }
    occs
}

pub(crate) fn bucket_start_pos(occs: &[usize]) -> Vec<usize> {
    let mut sum = 0;
    let mut buckets = vec![0; occs.len()];
    for (&occ, b) in occs.iter().zip(buckets.iter_mut()) {
        *b = sum;
        sum += occ;
    }
    buckets
}

pub(crate) fn bucket_end_pos(occs: &[usize]) -> Vec<usize> {
    let mut sum = 0;
    let mut buckets = vec![0; occs.len()];
    for (&occ, b) in occs.iter().zip(buckets.iter_mut()) {
        sum += occ;
        *b = sum;
    }
    buckets
}

/// Classify every position as S (bit 1) or L (bit 0) and collect the LMS
/// positions in ascending order.
fn classify(x: &[u32]) -> (BitVec, Vec<usize>) {
    let n = x.len();
    let mut types = BitVec::new(n);
    types.set(n - 1, true);

    if n == 1 {
        return (types, vec![]);
    }

    let mut lms = vec![n - 1];
    let mut next_is_s = true;
    for i in (0..n - 1).rev() {
        // x[i] is S-type iff x[i] < x[i + 1], or they are equal and
        // x[i + 1] is S-type.
        let is_s = x[i] < x[i + 1] || (x[i] == x[i + 1] && next_is_s);
        if is_s {
            types.set(i, true);
        } else if next_is_s {
            // x[i + 1] is leftmost-S: S-type with an L-type predecessor.
            lms.push(i + 1);
        }
        next_is_s = is_s;
    }
    lms.reverse();
    (types, lms)
}

fn is_lms(types: &BitVec, i: usize) -> bool {
    i != 0 && i != UNDEF && types.get(i) && !types.get(i - 1)
}

/// The two induction passes: L-types left to right from bucket starts,
/// then S-types right to left from bucket ends.
fn induce(x: &[u32], types: &BitVec, occs: &[usize], sa: &mut [usize]) {
    let n = x.len();

    let mut starts = bucket_start_pos(occs);
    for i in 0..n {
        let j = sa[i];
        if j != UNDEF && j != 0 && !types.get(j - 1) {
            let c = x[j - 1] as usize;
            sa[starts[c]] = j - 1;
            starts[c] += 1;
        }
    }

    let mut ends = bucket_end_pos(occs);
    for i in (0..n).rev() {
        let j = sa[i];
        if j != UNDEF && j != 0 && types.get(j - 1) {
            let c = x[j - 1] as usize;
            ends[c] -= 1;
            sa[ends[c]] = j - 1;
        }
    }
}

/// Two LMS substrings are equal iff they agree symbol for symbol and
/// class for class up to their next LMS boundary.
fn equal_lms(x: &[u32], types: &BitVec, i: usize, j: usize) -> bool {
    if i == j {
        return true;
    }
    // The sentinel substring is equal to nothing else.
    if i == x.len() - 1 || j == x.len() - 1 {
        return false;
    }

    let mut k = 0;
    loop {
        if k > 0 && is_lms(types, i + k) && is_lms(types, j + k) {
            return true;
        }
        if is_lms(types, i + k) != is_lms(types, j + k) || x[i + k] != x[j + k] {
            return false;
        }
        k += 1;
    }
}

fn sais_rec(x: &[u32], sigma: usize) -> Vec<usize> {
    let n = x.len();
    if sigma == n {
        // Every symbol is unique, the text is its own inverse permutation.
        let mut sa = vec![0; n];
        for (i, &c) in x.iter().enumerate() {
            sa[c as usize] = i;
        }
        return sa;
    }

    let (types, lms) = classify(x);
    let occs = count_symbols(x, sigma);
    let mut sa = vec![UNDEF; n];

    // Seed the LMS positions at their bucket tails and induce once. This
    // sorts the LMS substrings, not yet the LMS suffixes.
    let mut ends = bucket_end_pos(&occs);
    for &i in lms.iter().rev() {
        let c = x[i] as usize;
        ends[c] -= 1;
        sa[ends[c]] = i;
    }
    induce(x, &types, &occs, &mut sa);

    // Name the LMS substrings in the order induced above. Two adjacent
    // LMS positions in the text are at least two apart, so names fit in
    // a half-length buffer.
    let lms_sorted: Vec<usize> = sa.iter().copied().filter(|&j| is_lms(&types, j)).collect();
    let mut names = vec![UNDEF; n / 2 + 1];
    let mut name = 0;
    names[lms_sorted[0] / 2] = 0;
    let mut prev = lms_sorted[0];
    for &j in &lms_sorted[1..] {
        if !equal_lms(x, &types, prev, j) {
            name += 1;
        }
        names[j / 2] = name;
        prev = j;
    }

    // Sort the reduced string of names; its suffix order is the order of
    // the LMS suffixes.
    let u: Vec<u32> = lms.iter().map(|&i| names[i / 2] as u32).collect();
    let sa_u = sais_rec(&u, name + 1);

    // Place the LMS positions in their final order and induce again.
    for s in sa.iter_mut() {
        *s = UNDEF;
    }
    let mut ends = bucket_end_pos(&occs);
    for &k in sa_u.iter().rev() {
        let j = lms[k];
        let c = x[j] as usize;
        ends[c] -= 1;
        sa[ends[c]] = j;
    }
    induce(x, &types, &occs, &mut sa);

    sa
}

/// Build a suffix array from the sentinel-terminated integer text `text`
/// using the SA-IS algorithm.
///
/// The text must be the mapped form of the text `alpha` was trained on,
/// so that every code of the alphabet occurs in it.
pub fn sais(text: &[u32], alpha: &Alphabet) -> Vec<usize> {
    debug_assert_eq!(
        text.iter().rposition(|&c| c != 0),
        text.len().checked_sub(2),
        "the text must end with a single sentinel",
    );
    match text.len() {
        0 => vec![],
        1 => vec![0],
        _ => sais_rec(text, alpha.len()),
    }
}

/// The S/L classification of `text` as a bit vector, bit `i` set iff
/// position `i` is S-type.
pub fn classify_sl(text: &[u32]) -> BitVec {
    classify(text).0
}
