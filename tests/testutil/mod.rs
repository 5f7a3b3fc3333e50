use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Every occurrence of `pattern` in `text`, by scanning.
pub fn naive_occurrences(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.is_empty() {
        return (0..=text.len()).collect();
    }
    if pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&i| &text[i..i + pattern.len()] == pattern)
        .collect()
}

/// Drives a test over random `(text, pattern)` pairs.
///
/// Texts are drawn over a small alphabet so that patterns actually
/// occur; patterns mix slices of the text with freshly sampled strings.
pub struct TestRunner {
    pub texts: usize,
    pub patterns: usize,
    pub text_size: usize,
    pub alphabet_size: u8,
    pub pattern_size_max: usize,
}

impl TestRunner {
    pub fn run<R>(&self, run_test: R)
    where
        R: Fn(&[u8], &[u8]),
    {
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..self.texts {
            let text: Vec<u8> = (0..self.text_size)
                .map(|_| rng.gen::<u8>() % self.alphabet_size + b'a')
                .collect();

            for _ in 0..self.patterns {
                let pattern_size = rng.gen::<usize>() % self.pattern_size_max + 1;
                let pattern: Vec<u8> = if rng.gen_bool(0.5) && pattern_size <= text.len() {
                    let start = rng.gen::<usize>() % (text.len() - pattern_size + 1);
                    text[start..start + pattern_size].to_vec()
                } else {
                    (0..pattern_size)
                        .map(|_| rng.gen::<u8>() % self.alphabet_size + b'a')
                        .collect()
                };

                run_test(&text, &pattern);
            }
        }
    }
}
