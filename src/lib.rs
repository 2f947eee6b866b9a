//! # kindred
//!
//! Property-graph type-hierarchy inference. Distinct node shapes are
//! reduced to weighted **signatures** (labels + property names), carved
//! into basic-type groups by their exact label sets, recursively bisected
//! into a binary cluster forest, and flattened into a supertype/subtype
//! table with optional-field annotations.
//!
//! ```rust
//! use kindred::cluster::{ClusterEngine, GmmSplit};
//! use kindred::hierarchy::flatten_forest;
//! use kindred::signature::{LabelSet, LabelVocab, Signature, SignatureBag};
//!
//! let vocab = LabelVocab::new(["Person"]);
//! let bag = SignatureBag::from_counts([
//!     (Signature::new(["Person"], ["name"]), 40),
//!     (Signature::new(["Person"], ["name", "age"]), 25),
//! ])?;
//!
//! let engine = ClusterEngine::new(GmmSplit::new().with_seed(42));
//! let forest = engine.run(&bag, &vocab, &[LabelSet::new(["Person"])])?;
//! let table = flatten_forest(&forest, &vocab);
//! let csv = table.to_csv_string()?;
//! assert!(csv.starts_with("id,labels,properties,subtypeof,type,is_basetype"));
//! # Ok::<(), kindred::Error>(())
//! ```

pub mod cluster;
/// Error types used across `kindred`.
pub mod error;
pub mod hierarchy;
pub mod metrics;
pub mod signature;
pub mod similarity;

pub use crate::cluster::{
    ClusterEngine, ClusterForest, ClusterNode, GmmSplit, MidpointSplit, RootCluster, SplitOracle,
};
pub use crate::hierarchy::{flatten_forest, TypeRow, TypeTable};
pub use crate::signature::{LabelSet, LabelVocab, Signature, SignatureBag};
pub use crate::similarity::dice;

pub use error::{Error, Result};
pub use metrics::{mutual_info, nmi, rand_index};
