//! Bill-of-materials tree: nodes, index paths, and the copy-on-write forest
//!
//! A [`Forest`] is an ordered list of top-level [`BomNode`]s. Nodes are held
//! behind `Rc` so that [`Forest::insert`] can return a new forest that shares
//! every subtree it did not touch with the old one. Only the nodes on the
//! path from the root to the insertion point are copied.

use crate::error::BomError;
use std::fmt;
use std::rc::Rc;

// ═══════════════════════════════════════════════════════════════════════════════
// BomNode
// ═══════════════════════════════════════════════════════════════════════════════

/// One component in a bill of materials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomNode {
    pub name: String,
    /// `None` means the quantity is not tracked
    pub quantity: Option<u32>,
    pub children: Vec<Rc<BomNode>>,
}

impl BomNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            children: Vec::new(),
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_child(mut self, child: BomNode) -> Self {
        self.children.push(Rc::new(child));
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Display label, e.g. `Sleeve (x2)` or `Garment`
    pub fn label(&self) -> String {
        match self.quantity {
            Some(quantity) => format!("{} (x{})", self.name, quantity),
            None => self.name.clone(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// BomPath
// ═══════════════════════════════════════════════════════════════════════════════

/// Position of a node as zero-based child indices from the forest root
///
/// The empty path addresses the forest itself, so inserting at it adds a new
/// top-level component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BomPath(Vec<usize>);

impl BomPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Path of the `index`-th child of the node at this path
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }
}

impl From<Vec<usize>> for BomPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for BomPath {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for BomPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "root");
        }
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Forest
// ═══════════════════════════════════════════════════════════════════════════════

/// A row of the flattened, pre-order view of a forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomRow<'a> {
    pub node: &'a BomNode,
    /// Nesting depth, 0 for top-level components
    pub depth: usize,
    pub path: BomPath,
}

/// Ordered sequence of top-level components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    roots: Vec<Rc<BomNode>>,
}

impl Forest {
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    pub fn from_roots(roots: Vec<BomNode>) -> Self {
        Self {
            roots: roots.into_iter().map(Rc::new).collect(),
        }
    }

    /// Sample garment BOM shown on first launch
    pub fn demo() -> Self {
        Self::from_roots(vec![BomNode::new("Garment")
            .with_child(BomNode::new("Body").with_quantity(1))
            .with_child(
                BomNode::new("Sleeve")
                    .with_quantity(2)
                    .with_child(BomNode::new("Cuff").with_quantity(2)),
            )])
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of components at every level
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Depth of the deepest component, `None` for an empty forest
    pub fn max_depth(&self) -> Option<usize> {
        self.iter().map(|row| row.depth).max()
    }

    /// Look up the node at `path`; the root path resolves to nothing
    pub fn get(&self, path: &BomPath) -> Option<&BomNode> {
        let (&first, rest) = path.indices().split_first()?;
        let mut node = self.roots.get(first)?.as_ref();
        for &index in rest {
            node = node.children.get(index)?.as_ref();
        }
        Some(node)
    }

    /// Depth-first pre-order traversal
    pub fn iter(&self) -> Preorder<'_> {
        Preorder::new(&self.roots)
    }

    /// Flatten the forest into `(node, depth)` rows in display order
    pub fn render(&self) -> Vec<BomRow<'_>> {
        self.iter().collect()
    }

    /// Return a new forest with `node` appended under the node at `path`
    ///
    /// The empty path appends a new top-level component. `self` is left
    /// untouched, and every subtree off the root-to-`path` spine is shared
    /// with the returned forest.
    pub fn insert(&self, path: &BomPath, node: BomNode) -> Result<Forest, BomError> {
        let roots = insert_at(&self.roots, path.indices(), Rc::new(node), path)?;
        Ok(Forest { roots })
    }
}

fn insert_at(
    items: &[Rc<BomNode>],
    remaining: &[usize],
    node: Rc<BomNode>,
    full_path: &BomPath,
) -> Result<Vec<Rc<BomNode>>, BomError> {
    let mut updated = items.to_vec();
    match remaining.split_first() {
        None => updated.push(node),
        Some((&head, tail)) => {
            let target = items.get(head).ok_or_else(|| BomError::PathNotFound {
                path: full_path.clone(),
            })?;
            let children = insert_at(&target.children, tail, node, full_path)?;
            updated[head] = Rc::new(BomNode {
                name: target.name.clone(),
                quantity: target.quantity,
                children,
            });
        }
    }
    Ok(updated)
}

/// Pre-order iterator over a forest, yielding [`BomRow`]s
pub struct Preorder<'a> {
    stack: Vec<BomRow<'a>>,
}

impl<'a> Preorder<'a> {
    fn new(roots: &'a [Rc<BomNode>]) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_children(roots, &BomPath::root(), 0);
        iter
    }

    // Pushed in reverse so the first child is popped first.
    fn push_children(&mut self, children: &'a [Rc<BomNode>], parent: &BomPath, depth: usize) {
        for (index, child) in children.iter().enumerate().rev() {
            self.stack.push(BomRow {
                node: child.as_ref(),
                depth,
                path: parent.child(index),
            });
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = BomRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.stack.pop()?;
        self.push_children(&row.node.children, &row.path, row.depth + 1);
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_and_depths(forest: &Forest) -> Vec<(String, usize)> {
        forest
            .render()
            .into_iter()
            .map(|row| (row.node.name.clone(), row.depth))
            .collect()
    }

    fn pairs(expected: &[(&str, usize)]) -> Vec<(String, usize)> {
        expected
            .iter()
            .map(|(name, depth)| (name.to_string(), *depth))
            .collect()
    }

    #[test]
    fn test_insert_sibling_after_existing_child() {
        let forest = Forest::from_roots(vec![
            BomNode::new("Garment").with_child(BomNode::new("Body").with_quantity(1))
        ]);

        let updated = forest
            .insert(&BomPath::from(vec![0]), BomNode::new("Sleeve").with_quantity(2))
            .unwrap();

        assert_eq!(
            names_and_depths(&updated),
            pairs(&[("Garment", 0), ("Body", 1), ("Sleeve", 1)])
        );
        assert_eq!(updated.get(&BomPath::from(vec![0, 1])).unwrap().quantity, Some(2));
    }

    #[test]
    fn test_insert_root_into_empty_forest() {
        let forest = Forest::new();

        let updated = forest.insert(&BomPath::root(), BomNode::new("Frame")).unwrap();

        assert_eq!(updated, Forest::from_roots(vec![BomNode::new("Frame")]));
        assert_eq!(names_and_depths(&updated), pairs(&[("Frame", 0)]));
    }

    #[test]
    fn test_insert_grandchild() {
        let forest =
            Forest::from_roots(vec![BomNode::new("A").with_child(BomNode::new("B"))]);

        let updated = forest.insert(&BomPath::from(vec![0, 0]), BomNode::new("C")).unwrap();

        assert_eq!(
            names_and_depths(&updated),
            pairs(&[("A", 0), ("B", 1), ("C", 2)])
        );
    }

    #[test]
    fn test_insert_at_root_appends_last_top_level_row() {
        let forest = Forest::demo();
        let before = forest.render().len();

        let updated = forest.insert(&BomPath::root(), BomNode::new("Trim")).unwrap();
        let rows = updated.render();

        assert_eq!(rows.len(), before + 1);
        let last = rows.last().unwrap();
        assert_eq!(last.node.name, "Trim");
        assert_eq!(last.depth, 0);
        assert_eq!(last.path, BomPath::from(vec![1]));
    }

    #[test]
    fn test_insert_lands_after_existing_subtree() {
        let forest = Forest::demo();

        // Garment already has Body and Sleeve (with Cuff beneath it)
        let updated = forest.insert(&BomPath::from(vec![0]), BomNode::new("Collar")).unwrap();

        assert_eq!(
            names_and_depths(&updated),
            pairs(&[
                ("Garment", 0),
                ("Body", 1),
                ("Sleeve", 1),
                ("Cuff", 2),
                ("Collar", 1),
            ])
        );
    }

    #[test]
    fn test_insert_leaves_original_untouched() {
        let forest = Forest::demo();
        let snapshot = forest.clone();

        let _ = forest.insert(&BomPath::from(vec![0, 1, 0]), BomNode::new("Button")).unwrap();

        assert_eq!(forest, snapshot);
        assert_eq!(forest.len(), 4);
    }

    #[test]
    fn test_insert_shares_untouched_subtrees() {
        let forest = Forest::demo()
            .insert(&BomPath::root(), BomNode::new("Lining"))
            .unwrap();

        let updated = forest
            .insert(&BomPath::from(vec![0, 1]), BomNode::new("Cuff Lining"))
            .unwrap();

        let old_garment = &forest.roots[0];
        let new_garment = &updated.roots[0];

        // Second root is off the spine
        assert!(Rc::ptr_eq(&forest.roots[1], &updated.roots[1]));
        // Body is a sibling of the spine
        assert!(Rc::ptr_eq(&old_garment.children[0], &new_garment.children[0]));
        // Cuff sits below the spine but is not on it
        assert!(Rc::ptr_eq(
            &old_garment.children[1].children[0],
            &new_garment.children[1].children[0]
        ));

        // Spine nodes are fresh copies
        assert!(!Rc::ptr_eq(old_garment, new_garment));
        assert!(!Rc::ptr_eq(&old_garment.children[1], &new_garment.children[1]));
        assert_eq!(new_garment.children[1].children.len(), 2);
        assert_eq!(old_garment.children[1].children.len(), 1);
    }

    #[test]
    fn test_insert_unresolved_path() {
        let forest = Forest::demo();

        let err = forest
            .insert(&BomPath::from(vec![0, 5]), BomNode::new("Pocket"))
            .unwrap_err();
        assert_eq!(
            err,
            BomError::PathNotFound {
                path: BomPath::from(vec![0, 5])
            }
        );

        let err = Forest::new()
            .insert(&BomPath::from(vec![0]), BomNode::new("Pocket"))
            .unwrap_err();
        assert!(matches!(err, BomError::PathNotFound { .. }));
    }

    #[test]
    fn test_render_is_repeatable() {
        let forest = Forest::demo();
        assert_eq!(forest.render(), forest.render());
    }

    #[test]
    fn test_render_paths_resolve_to_their_rows() {
        let forest = Forest::demo();
        for row in forest.render() {
            assert_eq!(forest.get(&row.path), Some(row.node));
            assert_eq!(row.path.indices().len(), row.depth + 1);
        }
    }

    #[test]
    fn test_forest_stats() {
        let forest = Forest::demo();
        assert_eq!(forest.len(), 4);
        assert_eq!(forest.root_count(), 1);
        assert_eq!(forest.max_depth(), Some(2));

        let empty = Forest::new();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.max_depth(), None);
        assert!(empty.render().is_empty());
    }

    #[test]
    fn test_get_root_path_is_none() {
        assert!(Forest::demo().get(&BomPath::root()).is_none());
    }

    #[test]
    fn test_node_label() {
        assert_eq!(BomNode::new("Sleeve").with_quantity(2).label(), "Sleeve (x2)");
        assert_eq!(BomNode::new("Garment").label(), "Garment");
    }

    #[test]
    fn test_path_display_and_child() {
        assert_eq!(BomPath::root().to_string(), "root");
        let path = BomPath::from(vec![0, 1, 3]);
        assert_eq!(path.to_string(), "0.1.3");
        assert_eq!(path.child(0), BomPath::from(vec![0, 1, 3, 0]));
        assert_eq!(BomPath::root().child(4), BomPath::from(vec![4]));
    }
}
