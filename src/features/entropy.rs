use std::collections::HashMap;

/// Shannon entropy (base 2) of the character distribution of `s`.
///
/// Probabilities are relative frequencies. The empty string has entropy 0.0.
pub fn shannon_entropy(s: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut len = 0usize;
    for c in s.chars() {
        *counts.entry(c).or_insert(0) += 1;
        len += 1;
    }

    if len == 0 {
        return 0.0;
    }

    let len = len as f64;
    let sum: f64 = counts
        .values()
        .map(|&count| {
            let p = count as f64 / len;
            p * p.log2()
        })
        .sum();

    // Avoid returning -0.0 for single-symbol strings
    if sum == 0.0 {
        0.0
    } else {
        -sum
    }
}
