//! Reference-signature selection.

use crate::signature::{LabelVocab, SignatureBag};

/// Build a synthetic reference signature for a member multiset.
///
/// Counts each label and property token's total occurrences across the
/// members (weighted by their counts, scanning members in canonical
/// order), then takes the single highest-count label and the `top_n`
/// highest-count properties, greedily and without reuse. Ties go to the
/// token discovered first. The result is the chosen tokens space-joined;
/// it need not be an actual member. Empty input yields an empty string.
pub fn select_reference(members: &SignatureBag, vocab: &LabelVocab, top_n: usize) -> String {
    // parallel discovery-order vectors keep tie-breaking reproducible
    let mut labels: Vec<&str> = Vec::new();
    let mut label_counts: Vec<u64> = Vec::new();
    let mut props: Vec<&str> = Vec::new();
    let mut prop_counts: Vec<u64> = Vec::new();

    for (signature, count) in members.iter() {
        for token in signature.tokens() {
            let (tokens, counts) = if vocab.contains(token) {
                (&mut labels, &mut label_counts)
            } else {
                (&mut props, &mut prop_counts)
            };
            match tokens.iter().position(|&t| t == token) {
                Some(i) => counts[i] += count,
                None => {
                    tokens.push(token);
                    counts.push(count);
                }
            }
        }
    }

    let mut parts: Vec<&str> = Vec::new();

    if let Some(best) = argmax_first(&label_counts) {
        parts.push(labels[best]);
    }

    for _ in 0..top_n {
        match argmax_first(&prop_counts) {
            Some(best) => {
                parts.push(props.remove(best));
                prop_counts.remove(best);
            }
            None => break,
        }
    }

    parts.join(" ")
}

/// Index of the maximum value; the earliest on ties, `None` when empty.
fn argmax_first(counts: &[u64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &c) in counts.iter().enumerate() {
        match best {
            Some(b) if counts[b] >= c => {}
            _ => best = Some(i),
        }
    }
    best
}
