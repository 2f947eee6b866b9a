//! Flattening a cluster forest into the type table.
//!
//! Walks each root's tree depth-first (left branch first) and emits one
//! row per accepted node with a fresh sequential id. Root rows are basic
//! types: they carry the partition's label set, no properties and no
//! parent. Every other row derives its label and property strings from
//! its cluster's members — tokens present in every member are mandatory,
//! tokens present in only some members are optional and rendered with a
//! `?` prefix.
//!
//! A row whose rendered labels+properties were already emitted anywhere in
//! the run is skipped together with its whole subtree. This mirrors the
//! clustering-time dedup but operates on renders, so it can prune
//! otherwise-distinct descendants (see DESIGN.md).

use std::collections::{BTreeSet, HashSet};

use crate::cluster::ClusterForest;
use crate::signature::{LabelVocab, Signature};

/// Type name carried by every basic-type row.
pub const BASETYPE_NAME: &str = "T1";

/// One row of the flattened type table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRow {
    /// Sequential row id, starting at 1.
    pub id: u32,
    /// Mandatory labels sorted and colon-joined, then optional labels
    /// `?`-prefixed, e.g. `"City:?Place"`.
    pub labels: String,
    /// Property names, same convention as `labels`.
    pub properties: String,
    /// Row id of the immediate supertype; `None` for basic types.
    pub parent: Option<u32>,
    /// Synthetic type name (`T1` for basic types, then `T2`, `T3`, …
    /// threaded through each root branch).
    pub type_name: String,
    /// Whether this row is a basic type.
    pub basetype: bool,
}

/// The flattened type table, in depth-first parent-before-children order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTable {
    pub(crate) rows: Vec<TypeRow>,
}

impl TypeTable {
    /// The rows in emission order.
    pub fn rows(&self) -> &[TypeRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Flatten a cluster forest into a type table.
///
/// Deterministic: flattening the same forest twice yields identical
/// tables. Root rows are always emitted; descendant rows are subject to
/// the render-dedup rule.
pub fn flatten_forest(forest: &ClusterForest, vocab: &LabelVocab) -> TypeTable {
    let mut rows: Vec<TypeRow> = Vec::new();
    let mut seen_renders: HashSet<String> = HashSet::new();
    let mut next_id: u32 = 1;

    for root in forest.roots() {
        let root_id = next_id;
        next_id += 1;
        rows.push(TypeRow {
            id: root_id,
            labels: root.label_set.render(),
            properties: String::new(),
            parent: None,
            type_name: BASETYPE_NAME.to_string(),
            basetype: true,
        });

        let Some(node) = forest.node(root.node) else {
            continue;
        };

        // type-name counter for this root branch
        let mut k: u32 = 2;
        // (node id, parent row id); left child kept on top of the stack
        let mut stack: Vec<(usize, u32)> = Vec::new();
        if let Some(right) = node.right {
            stack.push((right, root_id));
        }
        if let Some(left) = node.left {
            stack.push((left, root_id));
        }

        while let Some((id, parent_row)) = stack.pop() {
            let Some(node) = forest.node(id) else {
                continue;
            };
            let (labels, properties) = render_members(&node.members, vocab);

            let mut key = labels.clone();
            key.push_str(&properties);
            if !seen_renders.insert(key) {
                // duplicate render: drop this row and its whole subtree
                continue;
            }

            let row_id = next_id;
            next_id += 1;
            rows.push(TypeRow {
                id: row_id,
                labels,
                properties,
                parent: Some(parent_row),
                type_name: format!("T{k}"),
                basetype: false,
            });
            k += 1;

            if let Some(right) = node.right {
                stack.push((right, row_id));
            }
            if let Some(left) = node.left {
                stack.push((left, row_id));
            }
        }
    }

    TypeTable { rows }
}

/// Rendered `(labels, properties)` strings for a cluster's member set.
///
/// `all` is the union over members, `always` the intersection seeded from
/// the first member in canonical order; optional tokens are `all − always`.
fn render_members(members: &BTreeSet<Signature>, vocab: &LabelVocab) -> (String, String) {
    let mut all_labels: BTreeSet<&str> = BTreeSet::new();
    let mut all_props: BTreeSet<&str> = BTreeSet::new();
    let mut always_labels: BTreeSet<&str> = BTreeSet::new();
    let mut always_props: BTreeSet<&str> = BTreeSet::new();

    for (i, signature) in members.iter().enumerate() {
        let labels: BTreeSet<&str> = signature.labels(vocab).collect();
        let props: BTreeSet<&str> = signature.properties(vocab).collect();
        if i == 0 {
            always_labels = labels.clone();
            always_props = props.clone();
        } else {
            always_labels = &always_labels & &labels;
            always_props = &always_props & &props;
        }
        all_labels.extend(labels.iter().copied());
        all_props.extend(props.iter().copied());
    }

    (
        render_tokens(&always_labels, &all_labels),
        render_tokens(&always_props, &all_props),
    )
}

fn render_tokens(always: &BTreeSet<&str>, all: &BTreeSet<&str>) -> String {
    let mut parts: Vec<String> = always.iter().map(|t| t.to_string()).collect();
    parts.extend(all.difference(always).map(|t| format!("?{t}")));
    parts.join(":")
}
