use num_traits::Zero;

/// Build a raw text for tests using a generator function `gen`,
/// resampling zeros: the sentinel is the mapping layer's job, so a raw
/// text must not contain it.
pub fn build_text<C: Zero + Clone, F: FnMut() -> C>(mut gen: F, len: usize) -> Vec<C> {
    let mut text = vec![C::zero(); len];
    for t in text.iter_mut() {
        let mut c = gen();
        while c.is_zero() {
            c = gen();
        }
        *t = c;
    }
    text
}

/// Compute the suffix array of the given text in a naive way for testing
/// purposes.
pub fn build_suffix_array<C: Ord>(text: &[C]) -> Vec<usize> {
    let n = text.len();
    let mut sa = (0..n).collect::<Vec<_>>();
    sa.sort_by_key(|&i| &text[i..n]);
    sa
}

/// Build the inverse suffix array from the suffix array.
pub fn build_inv_suffix_array(suffix_array: &[usize]) -> Vec<usize> {
    let mut isa = vec![0; suffix_array.len()];
    for (p, &i) in suffix_array.iter().enumerate() {
        isa[i] = p;
    }
    isa
}
