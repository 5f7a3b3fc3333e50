//! Suffix array construction with the DC3/skew algorithm:
//!    Kärkkäinen, Juha & Sanders, Peter (2003). Simple Linear Work Suffix
//!    Array Construction. ICALP 2003, LNCS 2719, 943–955.

use crate::alphabet::Alphabet;

/// Read a symbol, treating everything past the end as the sentinel.
///
/// The skew recursion shifts indices by up to two positions, so reads
/// past the end are routine and must compare below every real symbol.
fn safe_idx(x: &[u32], i: usize) -> u32 {
    if i < x.len() {
        x[i]
    } else {
        0
    }
}

/// Stable bucket sort of `idx` by the symbol at `offset` positions past
/// each index.
fn bucket_sort(x: &[u32], idx: &mut Vec<usize>, offset: usize, asize: usize) {
    let mut buckets = vec![0usize; asize];
    for &i in idx.iter() {
        buckets[safe_idx(x, i + offset) as usize] += 1;
    }
    let mut acc = 0;
    for b in buckets.iter_mut() {
        let k = *b;
        *b = acc;
        acc += k;
    }

    let mut out = vec![0usize; idx.len()];
    for &i in idx.iter() {
        let c = safe_idx(x, i + offset) as usize;
        out[buckets[c]] = i;
        buckets[c] += 1;
    }
    *idx = out;
}

/// Radix sort of `idx` by the 3-grams starting at each index.
fn radix3(x: &[u32], idx: &mut Vec<usize>, asize: usize) {
    bucket_sort(x, idx, 2, asize);
    bucket_sort(x, idx, 1, asize);
    bucket_sort(x, idx, 0, asize);
}

fn equal3(x: &[u32], i: usize, j: usize) -> bool {
    safe_idx(x, i) == safe_idx(x, j)
        && safe_idx(x, i + 1) == safe_idx(x, j + 1)
        && safe_idx(x, i + 2) == safe_idx(x, j + 2)
}

/// Map an index of `x` (with `i mod 3 != 0`) to its compact rank slot.
fn map_x_sa12(k: usize) -> usize {
    2 * (k / 3) + (k % 3) - 1
}

/// Map an index of the reduced string `u` back to an index of `x`, where
/// `m` is the number of mod-1 positions at the front of `u`.
fn map_u_x(i: usize, m: usize) -> usize {
    if i < m {
        1 + 3 * i
    } else {
        2 + 3 * (i - m)
    }
}

/// Rank the sorted mod-1/mod-2 suffixes by their leading 3-grams.
///
/// Returns the ranks in compact slot order together with the size of the
/// reduced alphabet (one larger than the largest rank, 0 reserved).
fn assign_ranks(x: &[u32], sa12: &[usize]) -> (Vec<u32>, usize) {
    let mut ranks = vec![0u32; sa12.len()];
    let mut asize = 1;
    if let Some((&first, rest)) = sa12.split_first() {
        ranks[map_x_sa12(first)] = asize as u32;
        let mut prev = first;
        for &i in rest {
            if !equal3(x, prev, i) {
                asize += 1;
            }
            ranks[map_x_sa12(i)] = asize as u32;
            prev = i;
        }
        asize += 1;
    }
    (ranks, asize)
}

/// Concatenate the ranks of mod-1 positions and then of mod-2 positions.
/// The terminal sentinel of `x` doubles as the central separator, so no
/// explicit one is inserted.
fn build_u(ranks: &[u32]) -> Vec<u32> {
    let mut u = Vec::with_capacity(ranks.len());
    u.extend(ranks.iter().step_by(2));
    u.extend(ranks.iter().skip(1).step_by(2));
    u
}

fn less(x: &[u32], i: usize, j: usize, isa: &[usize]) -> bool {
    let a = safe_idx(x, i);
    let b = safe_idx(x, j);
    if a < b {
        return true;
    }
    if a > b {
        return false;
    }
    if i % 3 != 0 && j % 3 != 0 {
        return isa[i] < isa[j];
    }
    // At most two steps until both shifted indices are back in sa12.
    less(x, i + 1, j + 1, isa)
}

/// Merge the sorted mod-1/mod-2 and mod-0 suffixes.
fn merge(x: &[u32], sa12: &[usize], sa3: &[usize]) -> Vec<usize> {
    let mut isa = vec![0usize; x.len()];
    for (rank, &i) in sa12.iter().enumerate() {
        isa[i] = rank;
    }

    let mut sa = Vec::with_capacity(x.len());
    let (mut i, mut j) = (0, 0);
    while i < sa12.len() && j < sa3.len() {
        if less(x, sa12[i], sa3[j], &isa) {
            sa.push(sa12[i]);
            i += 1;
        } else {
            sa.push(sa3[j]);
            j += 1;
        }
    }
    sa.extend_from_slice(&sa12[i..]);
    sa.extend_from_slice(&sa3[j..]);
    sa
}

fn skew_rec(x: &[u32], asize: usize) -> Vec<usize> {
    let n = x.len();

    let mut sa12: Vec<usize> = (0..n).filter(|i| i % 3 != 0).collect();
    radix3(x, &mut sa12, asize);

    let (ranks, new_asize) = assign_ranks(x, &sa12);
    if new_asize - 1 < sa12.len() {
        // 3-grams collide, sort the reduced string recursively.
        let u = build_u(&ranks);
        let u_sa = skew_rec(&u, new_asize);
        let m = (u_sa.len() + 1) / 2;
        for (k, &ui) in u_sa.iter().enumerate() {
            sa12[k] = map_u_x(ui, m);
        }
    }

    // The mod-0 suffixes sort by their first symbol with ties broken by
    // the rank of the following suffix, which sa12 already provides.
    let mut sa3 = Vec::with_capacity(n - sa12.len());
    if n % 3 == 1 {
        sa3.push(n - 1);
    }
    sa3.extend(sa12.iter().filter(|&&i| i % 3 == 1).map(|&i| i - 1));
    bucket_sort(x, &mut sa3, 0, asize);

    merge(x, &sa12, &sa3)
}

/// Build a suffix array from the sentinel-terminated integer text `text`
/// using the DC3/skew algorithm.
pub fn skew(text: &[u32], alpha: &Alphabet) -> Vec<usize> {
    debug_assert_eq!(
        text.iter().rposition(|&c| c != 0),
        text.len().checked_sub(2),
        "the text must end with a single sentinel",
    );
    skew_rec(text, alpha.len())
}
