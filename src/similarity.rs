//! String similarity for signatures.
//!
//! Signatures are compared with the **Dice coefficient over character
//! bigrams**: twice the number of shared bigrams divided by the total
//! bigram count of both strings. Deterministic, symmetric, and pure; the
//! only degenerate inputs are single-character operands, which have no
//! bigrams and score 0.

/// Dice coefficient between two strings, in `[0, 1]`.
///
/// Equal strings score 1.0; if either operand is a single character it
/// cannot share a bigram and scores 0.0. Otherwise both bigram lists are
/// sorted and merge-scanned to count exact matches:
///
/// ```text
/// dice(a, b) = 2 * matches / (|bigrams(a)| + |bigrams(b)|)
/// ```
///
/// # Example
///
/// ```rust
/// use kindred::similarity::dice;
///
/// assert_eq!(dice("night", "night"), 1.0);
/// assert_eq!(dice("night", "nacht"), 0.25);
/// assert_eq!(dice("ab", "c"), 0.0);
/// ```
pub fn dice(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // single characters have no bigrams
    if a_chars.len() <= 1 || b_chars.len() <= 1 {
        return 0.0;
    }

    let mut a_bigrams = bigrams(&a_chars);
    let mut b_bigrams = bigrams(&b_chars);
    a_bigrams.sort_unstable();
    b_bigrams.sort_unstable();

    let (len_a, len_b) = (a_bigrams.len(), b_bigrams.len());
    let mut matches = 0usize;
    let (mut i, mut j) = (0usize, 0usize);

    // sorted merge scan: count exact bigram matches
    while i < len_a && j < len_b {
        if a_bigrams[i] == b_bigrams[j] {
            matches += 1;
            i += 1;
            j += 1;
        } else if a_bigrams[i] < b_bigrams[j] {
            i += 1;
        } else {
            j += 1;
        }
    }

    (2 * matches) as f64 / (len_a + len_b) as f64
}

fn bigrams(chars: &[char]) -> Vec<[char; 2]> {
    chars.windows(2).map(|w| [w[0], w[1]]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_strings_score_one() {
        assert_eq!(dice("Person age name", "Person age name"), 1.0);
        assert_eq!(dice("", ""), 1.0);
    }

    #[test]
    fn test_single_char_operand_scores_zero() {
        assert_eq!(dice("ab", "c"), 0.0);
        assert_eq!(dice("a", "bc"), 0.0);
        assert_eq!(dice("a", "b"), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [("night", "nacht"), ("A x", "A y"), ("Person name", "Actor name")];
        for (a, b) in pairs {
            assert_eq!(dice(a, b), dice(b, a));
        }
    }

    #[test]
    fn test_range() {
        let strings = ["A x", "A y", "B x y", "night", "nacht", "ab"];
        for a in strings {
            for b in strings {
                let s = dice(a, b);
                assert!((0.0..=1.0).contains(&s), "dice({a:?}, {b:?}) = {s}");
            }
        }
    }

    #[test]
    fn test_known_values() {
        // bigrams("night") = {ni, ig, gh, ht}, bigrams("nacht") = {na, ac, ch, ht}
        // one shared bigram -> 2*1 / (4+4)
        assert_eq!(dice("night", "nacht"), 0.25);
        // "A x" vs "A y" share "A " -> 2*1 / (2+2)
        assert_eq!(dice("A x", "A y"), 0.5);
        assert_eq!(dice("ab", "cd"), 0.0);
    }
}
