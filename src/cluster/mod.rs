//! Recursive bisecting clustering of node signatures.
//!
//! Basic types fall out of the label-set partitions; everything below them
//! comes from repeatedly splitting each group in two:
//!
//! 1. **Reference selection** — pick a synthetic representative from the
//!    most frequent label and top-N properties of the group
//!    ([`select_reference`]).
//! 2. **Similarity** — score every distinct signature against the
//!    reference with the bigram Dice coefficient.
//! 3. **Split** — expand the scores to one value per occurrence and hand
//!    them to a two-component [`SplitOracle`].
//! 4. **Recurse** — reassemble the instances into two candidate clusters,
//!    discard empty or already-seen ones, and split what remains.
//!
//! ## Why a mixture model over one scalar?
//!
//! All the oracle sees is each instance's similarity to the reference.
//! Signatures close to the dominant shape score high, outliers score low,
//! and a cheap two-component fit over that one dimension is enough to peel
//! the group apart — the recursion supplies the resolution a single split
//! lacks. The fit is deliberately under-converged (few iterations, coarse
//! tolerance) because it runs once per tree node.
//!
//! ## Usage
//!
//! ```rust
//! use kindred::cluster::{ClusterEngine, GmmSplit};
//! use kindred::signature::{LabelSet, LabelVocab, Signature, SignatureBag};
//!
//! let vocab = LabelVocab::new(["Person"]);
//! let bag = SignatureBag::from_counts([
//!     (Signature::new(["Person"], ["name"]), 40),
//!     (Signature::new(["Person"], ["name", "age"]), 25),
//! ])
//! .unwrap();
//!
//! let engine = ClusterEngine::new(GmmSplit::new().with_seed(42));
//! let forest = engine
//!     .run(&bag, &vocab, &[LabelSet::new(["Person"])])
//!     .unwrap();
//! assert_eq!(forest.roots().len(), 1);
//! ```

mod engine;
mod oracle;
mod reference;

pub use engine::{ClusterEngine, ClusterForest, ClusterNode, RootCluster};
pub use oracle::{GmmSplit, MidpointSplit, SplitOracle};
pub use reference::select_reference;
