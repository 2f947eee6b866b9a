//! From cluster forest to supertype/subtype table.
//!
//! Clustering alone only says which signatures belong together. This
//! module turns that structure into the artifact collaborators consume: a
//! flat table where every row is a type, roots are basic types, and each
//! deeper row points at its supertype.
//!
//! ```text
//! id │ labels │ properties │ subtypeof │ type │ is_basetype
//! ───┼────────┼────────────┼───────────┼──────┼────────────
//! 1  │ Person │            │           │ T1   │ yes
//! 2  │ Person │ name:?age  │ 1         │ T2   │ no
//! 3  │ Person │ name       │ 2         │ T3   │ no
//! ```
//!
//! Optionality falls out structurally: a token carried by every member of
//! a cluster is mandatory for that type, a token carried by only some
//! members is optional and rendered with a `?` prefix. See
//! [`flatten_forest`] for the walk and its dedup rule, and the
//! `TypeTable` CSV methods in [`table`] for the file format.

pub mod flatten;
pub mod table;

pub use flatten::{flatten_forest, TypeRow, TypeTable, BASETYPE_NAME};
pub use table::HEADER;
