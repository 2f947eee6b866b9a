//! Node signatures, weighted multisets and label-set partitions.
//!
//! A property-graph node shape is reduced to a **signature**: the node's
//! labels (sorted) followed by its property names (sorted), rendered as a
//! space-joined string. Tokens are classified against a [`LabelVocab`];
//! every token outside the vocabulary is a property name. A graph is then
//! summarized as a [`SignatureBag`], a multiset mapping each distinct
//! signature to its occurrence count, and carved into independent
//! basic-type groups by [`LabelSet`] partitions.

use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

/// A distinct node shape: sorted labels followed by sorted property names.
///
/// Signatures order canonically (lexicographic on the rendered string),
/// which fixes the iteration order everything downstream depends on for
/// reproducibility.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signature(String);

impl Signature {
    /// Build a signature from label and property tokens, normalizing order.
    pub fn new<L, P>(labels: L, properties: P) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let mut labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut properties: Vec<String> = properties.into_iter().map(Into::into).collect();
        labels.sort();
        properties.sort();
        labels.extend(properties);
        Signature(labels.join(" "))
    }

    /// Parse a space-joined rendering, re-canonicalizing token order
    /// against the vocabulary.
    pub fn parse(s: &str, vocab: &LabelVocab) -> Self {
        let (labels, properties): (Vec<&str>, Vec<&str>) =
            s.split_whitespace().partition(|t| vocab.contains(t));
        Signature::new(labels, properties)
    }

    /// The canonical space-joined rendering.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate over all tokens (labels then properties).
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    /// The signature's label tokens, per the vocabulary.
    pub fn labels<'a>(&'a self, vocab: &'a LabelVocab) -> impl Iterator<Item = &'a str> {
        self.tokens().filter(move |t| vocab.contains(t))
    }

    /// The signature's property tokens, per the vocabulary.
    pub fn properties<'a>(&'a self, vocab: &'a LabelVocab) -> impl Iterator<Item = &'a str> {
        self.tokens().filter(move |t| !vocab.contains(t))
    }

    /// The signature's exact label set.
    pub fn label_set<'a>(&'a self, vocab: &'a LabelVocab) -> BTreeSet<&'a str> {
        self.labels(vocab).collect()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The set of tokens known to be labels; everything else is a property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelVocab(BTreeSet<String>);

impl LabelVocab {
    /// Build a vocabulary from label strings.
    pub fn new<I>(labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        LabelVocab(labels.into_iter().map(Into::into).collect())
    }

    /// Whether `token` is a known label.
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Iterate over the labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of known labels.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A label-set partition. The empty set denotes the unlabelled partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelSet(BTreeSet<String>);

impl LabelSet {
    /// Build a partition from label strings.
    pub fn new<I>(labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        LabelSet(labels.into_iter().map(Into::into).collect())
    }

    /// The unlabelled partition.
    pub fn unlabelled() -> Self {
        LabelSet::default()
    }

    /// Whether this is the unlabelled partition.
    pub fn is_unlabelled(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the partition's labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Reject partitions that reference labels outside the vocabulary.
    pub fn validate(&self, vocab: &LabelVocab) -> Result<()> {
        for label in self.iter() {
            if !vocab.contains(label) {
                return Err(Error::UnknownLabel {
                    label: label.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Whether a signature's exact label set equals this partition.
    ///
    /// The unlabelled partition matches signatures carrying none of the
    /// known labels.
    pub fn matches(&self, signature: &Signature, vocab: &LabelVocab) -> bool {
        let sig_labels = signature.label_set(vocab);
        self.0.iter().map(String::as_str).eq(sig_labels)
    }

    /// Sorted, colon-joined rendering, e.g. `"City:Place"`.
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(":")
    }
}

/// A weighted multiset of signatures.
///
/// Every entry carries a positive occurrence count. Iteration is in
/// canonical (lexicographic) signature order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureBag {
    counts: BTreeMap<Signature, u64>,
}

impl SignatureBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        SignatureBag::default()
    }

    /// Build a bag from `(signature, count)` pairs, rejecting zero counts.
    /// Counts for repeated signatures accumulate.
    pub fn from_counts<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Signature, u64)>,
    {
        let mut bag = SignatureBag::new();
        for (signature, count) in entries {
            if count == 0 {
                return Err(Error::InvalidCount {
                    signature: signature.as_str().to_string(),
                });
            }
            bag.insert(signature, count);
        }
        Ok(bag)
    }

    /// Build a membership-only bag: count 1 per signature.
    pub fn from_members<'a, I>(members: I) -> Self
    where
        I: IntoIterator<Item = &'a Signature>,
    {
        let mut bag = SignatureBag::new();
        for signature in members {
            bag.counts.entry(signature.clone()).or_insert(1);
        }
        bag
    }

    /// Add `count` occurrences of `signature`.
    pub fn insert(&mut self, signature: Signature, count: u64) {
        *self.counts.entry(signature).or_insert(0) += count;
    }

    /// Occurrence count of a signature (0 if absent).
    pub fn count(&self, signature: &Signature) -> u64 {
        self.counts.get(signature).copied().unwrap_or(0)
    }

    /// Number of distinct signatures.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total instance count across all signatures.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over `(signature, count)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&Signature, u64)> {
        self.counts.iter().map(|(s, &c)| (s, c))
    }

    /// Iterate over distinct signatures in canonical order.
    pub fn signatures(&self) -> impl Iterator<Item = &Signature> {
        self.counts.keys()
    }

    /// The sub-bag of signatures whose exact label set equals `partition`,
    /// with their original counts.
    pub fn restrict_to(&self, partition: &LabelSet, vocab: &LabelVocab) -> SignatureBag {
        SignatureBag {
            counts: self
                .counts
                .iter()
                .filter(|(s, _)| partition.matches(s, vocab))
                .map(|(s, &c)| (s.clone(), c))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_canonical_order() {
        let sig = Signature::new(["Person", "Actor"], ["name", "age"]);
        assert_eq!(sig.as_str(), "Actor Person age name");
    }

    #[test]
    fn test_signature_parse_recanonicalizes() {
        let vocab = LabelVocab::new(["Person", "Actor"]);
        let sig = Signature::parse("name Person Actor age", &vocab);
        assert_eq!(sig.as_str(), "Actor Person age name");
        assert_eq!(sig.labels(&vocab).collect::<Vec<_>>(), ["Actor", "Person"]);
        assert_eq!(sig.properties(&vocab).collect::<Vec<_>>(), ["age", "name"]);
    }

    #[test]
    fn test_bag_rejects_zero_count() {
        let err = SignatureBag::from_counts([(Signature::new(["A"], ["x"]), 0)]).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidCount {
                signature: "A x".to_string()
            }
        );
    }

    #[test]
    fn test_bag_totals_and_order() {
        let bag = SignatureBag::from_counts([
            (Signature::new(["B"], ["y"]), 2),
            (Signature::new(["A"], ["x"]), 3),
        ])
        .unwrap();
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.total(), 5);
        let first = bag.signatures().next().unwrap();
        assert_eq!(first.as_str(), "A x");
    }

    #[test]
    fn test_partition_exact_match() {
        let vocab = LabelVocab::new(["A", "B"]);
        let part = LabelSet::new(["A"]);
        assert!(part.matches(&Signature::new(["A"], ["x"]), &vocab));
        // extra label disqualifies
        assert!(!part.matches(&Signature::new(["A", "B"], ["x"]), &vocab));
        assert!(!part.matches(&Signature::new::<[&str; 0], _>([], ["x"]), &vocab));
    }

    #[test]
    fn test_unlabelled_partition() {
        let vocab = LabelVocab::new(["A"]);
        let part = LabelSet::unlabelled();
        assert!(part.matches(&Signature::new::<[&str; 0], _>([], ["x", "y"]), &vocab));
        assert!(!part.matches(&Signature::new(["A"], ["x"]), &vocab));
    }

    #[test]
    fn test_partition_validation() {
        let vocab = LabelVocab::new(["A"]);
        assert!(LabelSet::new(["A"]).validate(&vocab).is_ok());
        let err = LabelSet::new(["Z"]).validate(&vocab).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownLabel {
                label: "Z".to_string()
            }
        );
    }

    #[test]
    fn test_restrict_to_keeps_original_counts() {
        let vocab = LabelVocab::new(["A", "B"]);
        let bag = SignatureBag::from_counts([
            (Signature::new(["A"], ["x"]), 3),
            (Signature::new(["A"], ["y"]), 2),
            (Signature::new(["B"], ["x"]), 7),
        ])
        .unwrap();
        let group = bag.restrict_to(&LabelSet::new(["A"]), &vocab);
        assert_eq!(group.len(), 2);
        assert_eq!(group.total(), 5);
        assert_eq!(group.count(&Signature::new(["A"], ["x"])), 3);
    }
}
