//! Cluster-agreement metrics.
//!
//! Measures for comparing two clusterings of the same signature universe.
//! Clusterings are given as lists of element sets, which is exactly the
//! shape the engine's accepted-cluster output has — these functions treat
//! clusters purely as sets and know nothing about the tree.
//!
//! | Metric | Range | Best | Properties |
//! |--------|-------|------|------------|
//! | [`rand_index`] | [0, 1] | 1 | Pairwise agreement |
//! | [`nmi`] | [0, 1] | 1 | Information-theoretic, normalized |
//!
//! [`mutual_info`] exposes the raw mutual information together with both
//! partition entropies, for callers that want a different normalization.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use kindred::metrics::{nmi, rand_index};
//!
//! let universe: BTreeSet<&str> = ["a", "b", "c", "d"].into();
//! let x = vec![BTreeSet::from(["a", "b"]), BTreeSet::from(["c", "d"])];
//! let y = vec![BTreeSet::from(["a", "b"]), BTreeSet::from(["c", "d"])];
//!
//! assert_eq!(rand_index(&universe, &x, &y), 1.0);
//! assert!((nmi(&universe, &x, &y) - 1.0).abs() < 1e-9);
//! ```

use std::collections::BTreeSet;

/// Rand index between two partitions: the fraction of element pairs on
/// which the partitions agree (same-set in both, or different-set in
/// both). 1.0 means identical grouping; fewer than two elements trivially
/// agree.
pub fn rand_index<T: Ord>(universe: &BTreeSet<T>, x: &[BTreeSet<T>], y: &[BTreeSet<T>]) -> f64 {
    let elems: Vec<&T> = universe.iter().collect();
    let n = elems.len();
    if n < 2 {
        return 1.0;
    }

    let mut agree = 0u64;
    for i in 0..n {
        for j in (i + 1)..n {
            let same_x = together(x, elems[i], elems[j]);
            let same_y = together(y, elems[i], elems[j]);
            if same_x == same_y {
                agree += 1;
            }
        }
    }

    agree as f64 / (n * (n - 1) / 2) as f64
}

fn together<T: Ord>(partition: &[BTreeSet<T>], a: &T, b: &T) -> bool {
    partition.iter().any(|s| s.contains(a) && s.contains(b))
}

/// Mutual information between two partitions of `universe`, with the
/// entropies of each partition.
///
/// Returns `(MI, H(U), H(V))`; MI is non-negative and bounded by both
/// entropies. Empty universes yield all zeros.
pub fn mutual_info<T: Ord>(
    universe: &BTreeSet<T>,
    u: &[BTreeSet<T>],
    v: &[BTreeSet<T>],
) -> (f64, f64, f64) {
    let n = universe.len() as f64;
    if universe.is_empty() {
        return (0.0, 0.0, 0.0);
    }

    let mut mi = 0.0;
    for ui in u {
        for vj in v {
            let joint = ui.intersection(vj).filter(|e| universe.contains(e)).count() as f64;
            if joint > 0.0 {
                let p_uv = joint / n;
                let p_u = ui.len() as f64 / n;
                let p_v = vj.len() as f64 / n;
                mi += p_uv * (p_uv / (p_u * p_v)).ln();
            }
        }
    }

    (mi, entropy(universe, u), entropy(universe, v))
}

/// Normalized mutual information: `2·MI / (H(U) + H(V))`, in [0, 1].
///
/// 1.0 for identical partitions; when both partitions are trivial (zero
/// entropy) the partitions carry no information to disagree on and the
/// score is 1.0.
pub fn nmi<T: Ord>(universe: &BTreeSet<T>, u: &[BTreeSet<T>], v: &[BTreeSet<T>]) -> f64 {
    let (mi, h_u, h_v) = mutual_info(universe, u, v);
    let denom = h_u + h_v;
    if denom > 0.0 {
        2.0 * mi / denom
    } else {
        1.0
    }
}

fn entropy<T: Ord>(universe: &BTreeSet<T>, partition: &[BTreeSet<T>]) -> f64 {
    let n = universe.len() as f64;
    partition
        .iter()
        .map(|s| s.len() as f64 / n)
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universe(elems: &[&'static str]) -> BTreeSet<&'static str> {
        elems.iter().copied().collect()
    }

    fn part(sets: &[&[&'static str]]) -> Vec<BTreeSet<&'static str>> {
        sets.iter().map(|s| s.iter().copied().collect()).collect()
    }

    #[test]
    fn test_rand_index_identical() {
        let s = universe(&["a", "b", "c", "d"]);
        let x = part(&[&["a", "b"], &["c", "d"]]);
        assert_eq!(rand_index(&s, &x, &x), 1.0);
    }

    #[test]
    fn test_rand_index_partial_agreement() {
        let s = universe(&["a", "b", "c", "d"]);
        let x = part(&[&["a", "b"], &["c", "d"]]);
        let y = part(&[&["a", "c"], &["b", "d"]]);
        // every pair together in one partition is split in the other, but
        // the cross pairs agree on being apart
        let score = rand_index(&s, &x, &y);
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_rand_index_singleton_universe() {
        let s = universe(&["a"]);
        assert_eq!(rand_index(&s, &part(&[&["a"]]), &part(&[&["a"]])), 1.0);
    }

    #[test]
    fn test_nmi_identical() {
        let s = universe(&["a", "b", "c", "d", "e", "f"]);
        let x = part(&[&["a", "b"], &["c", "d"], &["e", "f"]]);
        assert!((nmi(&s, &x, &x) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_nmi_renamed_clusters() {
        let s = universe(&["a", "b", "c", "d"]);
        let x = part(&[&["a", "b"], &["c", "d"]]);
        let y = part(&[&["c", "d"], &["a", "b"]]);
        assert!((nmi(&s, &x, &y) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_nmi_independent_partitions() {
        let s = universe(&["a", "b", "c", "d"]);
        let x = part(&[&["a", "b"], &["c", "d"]]);
        let y = part(&[&["a", "c"], &["b", "d"]]);
        assert!(nmi(&s, &x, &y) < 1e-9);
    }

    #[test]
    fn test_mutual_info_bounded_by_entropies() {
        let s = universe(&["a", "b", "c", "d", "e"]);
        let x = part(&[&["a", "b"], &["c", "d", "e"]]);
        let y = part(&[&["a"], &["b", "c"], &["d", "e"]]);
        let (mi, h_u, h_v) = mutual_info(&s, &x, &y);
        assert!(mi >= 0.0);
        assert!(mi <= h_u + 1e-9);
        assert!(mi <= h_v + 1e-9);
    }

    #[test]
    fn test_trivial_partitions() {
        let s = universe(&["a", "b"]);
        let whole = part(&[&["a", "b"]]);
        assert_eq!(nmi(&s, &whole, &whole), 1.0);
    }
}
