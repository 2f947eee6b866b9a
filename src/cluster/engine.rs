//! Recursive bisecting clustering engine.
//!
//! Each label-set partition of the input multiset becomes one root
//! cluster; every cluster with more than one instance is repeatedly
//! bisected via a reference signature, per-instance similarities and a
//! [`SplitOracle`], building a binary cluster tree. Candidate child
//! clusters that are empty or were already produced elsewhere in the run
//! are discarded, which is also what guarantees termination.
//!
//! Because the oracle assigns *instances*, two occurrences of the same
//! signature can land on different sides; the membership sets of the two
//! children may therefore overlap. That is accepted behavior, not an
//! error (see DESIGN.md).
//!
//! Trees are stored in an arena indexed by node id, and the engine drives
//! an explicit work stack rather than call-stack recursion, so deep
//! hierarchies cannot overflow the stack.

use std::collections::{BTreeSet, HashSet};

use crate::cluster::oracle::SplitOracle;
use crate::cluster::reference::select_reference;
use crate::error::{Error, Result};
use crate::signature::{LabelSet, LabelVocab, Signature, SignatureBag};
use crate::similarity::dice;

/// One cluster in the tree: its member signatures and up to two children.
///
/// A node with both children `None` is terminal, either because it holds a
/// single instance or because both candidate splits were degenerate.
#[derive(Debug, Clone)]
pub struct ClusterNode {
    /// Arena id of this node.
    pub id: usize,
    /// Member signatures, duplicates collapsed.
    pub members: BTreeSet<Signature>,
    /// Arena id of the left child, if the split was accepted.
    pub left: Option<usize>,
    /// Arena id of the right child, if the split was accepted.
    pub right: Option<usize>,
}

impl ClusterNode {
    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A root cluster, corresponding 1:1 to a label-set partition.
#[derive(Debug, Clone)]
pub struct RootCluster {
    /// The partition this root was built from.
    pub label_set: LabelSet,
    /// Arena id of the root node.
    pub node: usize,
}

/// The forest produced by one clustering run: an arena of nodes, one root
/// per partition, and the accepted cluster sets in discovery order.
#[derive(Debug, Clone, Default)]
pub struct ClusterForest {
    pub(crate) nodes: Vec<ClusterNode>,
    pub(crate) roots: Vec<RootCluster>,
    pub(crate) clusters: Vec<BTreeSet<Signature>>,
}

impl ClusterForest {
    /// Look up a node by arena id.
    pub fn node(&self, id: usize) -> Option<&ClusterNode> {
        self.nodes.get(id)
    }

    /// The root clusters, in partition order.
    pub fn roots(&self) -> &[RootCluster] {
        &self.roots
    }

    /// The deduplicated accepted cluster sets, in discovery order.
    /// Root groups are not part of this list; only accepted split results.
    pub fn clusters(&self) -> &[BTreeSet<Signature>] {
        &self.clusters
    }

    /// Total number of nodes in the forest.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the forest holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, members: BTreeSet<Signature>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(ClusterNode {
            id,
            members,
            left: None,
            right: None,
        });
        id
    }
}

/// Drives repeated bisection of signature multisets into a cluster forest.
#[derive(Debug, Clone)]
pub struct ClusterEngine<O> {
    oracle: O,
    top_props: usize,
}

impl<O: SplitOracle> ClusterEngine<O> {
    /// Create an engine around a split oracle. References are built from
    /// the most frequent label and the single most frequent property.
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            top_props: 1,
        }
    }

    /// Set how many properties the reference signature carries.
    pub fn with_top_props(mut self, top_props: usize) -> Self {
        self.top_props = top_props;
        self
    }

    /// Cluster the multiset, one root per label-set partition.
    ///
    /// Partitions are validated against the vocabulary before any
    /// clustering happens. Each root group keeps its original occurrence
    /// counts; recursive levels treat membership only (count 1 per
    /// signature).
    pub fn run(
        &self,
        bag: &SignatureBag,
        vocab: &LabelVocab,
        partitions: &[LabelSet],
    ) -> Result<ClusterForest> {
        for partition in partitions {
            partition.validate(vocab)?;
        }

        let mut forest = ClusterForest::default();
        // run-scoped: one cluster membership set is never produced twice
        let mut seen: HashSet<BTreeSet<Signature>> = HashSet::new();

        for partition in partitions {
            let group = bag.restrict_to(partition, vocab);
            let root = forest.push(group.signatures().cloned().collect());
            forest.roots.push(RootCluster {
                label_set: partition.clone(),
                node: root,
            });

            let mut stack: Vec<(usize, SignatureBag)> = vec![(root, group)];
            while let Some((id, members)) = stack.pop() {
                if members.total() <= 1 {
                    continue;
                }
                let (left, right) = self.bisect(&members, vocab)?;

                let mut accepted: Vec<(usize, SignatureBag)> = Vec::with_capacity(2);
                for (slot, side) in [(0usize, left), (1usize, right)] {
                    if side.is_empty() || !seen.insert(side.clone()) {
                        continue;
                    }
                    forest.clusters.push(side.clone());
                    let child = forest.push(side.clone());
                    let parent = &mut forest.nodes[id];
                    if slot == 0 {
                        parent.left = Some(child);
                    } else {
                        parent.right = Some(child);
                    }
                    accepted.push((child, SignatureBag::from_members(&side)));
                }
                // left branch is explored first
                while let Some(task) = accepted.pop() {
                    stack.push(task);
                }
            }
        }

        Ok(forest)
    }

    /// One bisection step: reference, per-instance similarities, oracle
    /// split, and reassembly of instances into two candidate member sets.
    fn bisect(
        &self,
        members: &SignatureBag,
        vocab: &LabelVocab,
    ) -> Result<(BTreeSet<Signature>, BTreeSet<Signature>)> {
        let reference = select_reference(members, vocab, self.top_props);

        // one entry per occurrence, in canonical signature order
        let mut values = Vec::with_capacity(members.total() as usize);
        for (signature, count) in members.iter() {
            let similarity = dice(&reference, signature.as_str());
            values.extend(std::iter::repeat(similarity).take(count as usize));
        }

        let sides = self.oracle.split(&values)?;
        if sides.len() != values.len() {
            return Err(Error::Other(format!(
                "split oracle returned {} assignments for {} instances",
                sides.len(),
                values.len()
            )));
        }

        let mut split: [BTreeSet<Signature>; 2] = [BTreeSet::new(), BTreeSet::new()];
        let mut at = 0usize;
        for (signature, count) in members.iter() {
            for _ in 0..count {
                split[sides[at].min(1)].insert(signature.clone());
                at += 1;
            }
        }
        let [left, right] = split;
        Ok((left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::oracle::MidpointSplit;

    fn sig(labels: &[&str], props: &[&str]) -> Signature {
        Signature::new(labels.iter().copied(), props.iter().copied())
    }

    fn two_shape_bag() -> (SignatureBag, LabelVocab, Vec<LabelSet>) {
        let bag = SignatureBag::from_counts([
            (sig(&["A"], &["x"]), 3),
            (sig(&["A"], &["y"]), 2),
        ])
        .unwrap();
        (bag, LabelVocab::new(["A"]), vec![LabelSet::new(["A"])])
    }

    #[test]
    fn test_clean_two_way_split() {
        let (bag, vocab, partitions) = two_shape_bag();
        let engine = ClusterEngine::new(MidpointSplit);
        let forest = engine.run(&bag, &vocab, &partitions).unwrap();

        assert_eq!(forest.roots().len(), 1);
        let root = forest.node(forest.roots()[0].node).unwrap();
        assert_eq!(root.members.len(), 2);

        // reference is "A x"; its instances sit at similarity 1.0, the
        // others at 0.5, so the midpoint oracle separates the two shapes
        let left = forest.node(root.left.unwrap()).unwrap();
        let right = forest.node(root.right.unwrap()).unwrap();
        assert_eq!(left.members.iter().next().unwrap().as_str(), "A y");
        assert_eq!(right.members.iter().next().unwrap().as_str(), "A x");
        assert!(left.is_leaf());
        assert!(right.is_leaf());
        assert_eq!(forest.clusters().len(), 2);
    }

    #[test]
    fn test_singleton_group_is_terminal() {
        let bag = SignatureBag::from_counts([(sig(&["A"], &["x"]), 1)]).unwrap();
        let vocab = LabelVocab::new(["A"]);
        let forest = ClusterEngine::new(MidpointSplit)
            .run(&bag, &vocab, &[LabelSet::new(["A"])])
            .unwrap();
        let root = forest.node(forest.roots()[0].node).unwrap();
        assert!(root.is_leaf());
        assert!(forest.clusters().is_empty());
    }

    #[test]
    fn test_forest_coverage_by_exact_label_set() {
        let bag = SignatureBag::from_counts([
            (sig(&["A"], &["x"]), 1),
            (sig(&["A", "B"], &["x"]), 1),
            (sig(&[], &["p"]), 1),
        ])
        .unwrap();
        let vocab = LabelVocab::new(["A", "B"]);
        let partitions = vec![
            LabelSet::new(["A"]),
            LabelSet::new(["A", "B"]),
            LabelSet::unlabelled(),
        ];
        let forest = ClusterEngine::new(MidpointSplit)
            .run(&bag, &vocab, &partitions)
            .unwrap();

        // each signature lands in exactly one root
        for signature in bag.signatures() {
            let owners = forest
                .roots()
                .iter()
                .filter(|r| forest.node(r.node).unwrap().members.contains(signature))
                .count();
            assert_eq!(owners, 1, "signature {signature} in {owners} roots");
        }
    }

    #[test]
    fn test_unknown_partition_label_rejected() {
        let (bag, vocab, _) = two_shape_bag();
        let err = ClusterEngine::new(MidpointSplit)
            .run(&bag, &vocab, &[LabelSet::new(["Nope"])])
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnknownLabel {
                label: "Nope".to_string()
            }
        );
    }

    /// Routes instance i to side i % 2, regardless of value.
    struct AlternatingSplit;

    impl SplitOracle for AlternatingSplit {
        fn split(&self, values: &[f64]) -> Result<Vec<usize>> {
            Ok((0..values.len()).map(|i| i % 2).collect())
        }
    }

    #[test]
    fn test_same_signature_may_land_on_both_sides() {
        let bag = SignatureBag::from_counts([
            (sig(&["A"], &["x"]), 2),
            (sig(&["A"], &["y"]), 1),
        ])
        .unwrap();
        let vocab = LabelVocab::new(["A"]);
        let forest = ClusterEngine::new(AlternatingSplit)
            .run(&bag, &vocab, &[LabelSet::new(["A"])])
            .unwrap();

        let root = forest.node(forest.roots()[0].node).unwrap();
        let left = forest.node(root.left.unwrap()).unwrap();
        let right = forest.node(root.right.unwrap()).unwrap();
        // instances of "A x" went to both candidate clusters
        let both = sig(&["A"], &["x"]);
        assert!(left.members.contains(&both));
        assert!(right.members.contains(&both));

        // no information vanished: children cover the parent
        let union: BTreeSet<_> = left.members.union(&right.members).cloned().collect();
        assert!(union.is_superset(&root.members));
    }

    /// Sends every instance to side 0.
    struct AllZeros;

    impl SplitOracle for AllZeros {
        fn split(&self, values: &[f64]) -> Result<Vec<usize>> {
            Ok(vec![0; values.len()])
        }
    }

    #[test]
    fn test_degenerate_splits_terminate_via_dedup() {
        let bag = SignatureBag::from_counts([
            (sig(&["A"], &["x"]), 2),
            (sig(&["A"], &["y"]), 2),
        ])
        .unwrap();
        let vocab = LabelVocab::new(["A"]);
        let forest = ClusterEngine::new(AllZeros)
            .run(&bag, &vocab, &[LabelSet::new(["A"])])
            .unwrap();

        // the full group is re-emitted once as a child, then the duplicate
        // candidate is discarded and recursion stops
        assert_eq!(forest.clusters().len(), 1);
        let root = forest.node(forest.roots()[0].node).unwrap();
        let child = forest.node(root.left.unwrap()).unwrap();
        assert_eq!(child.members, root.members);
        assert!(child.is_leaf());
        assert!(root.right.is_none());
    }
}
