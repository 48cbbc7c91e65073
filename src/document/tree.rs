/*!
 * Element tree interface used by the run rewriter.
 *
 * The rewriter never touches XML text directly; it queries and edits a tree
 * through this trait. Nodes are addressed by copyable [`NodeId`] handles, so
 * callers snapshot node lists before mutating instead of holding iterators
 * across edits.
 */

use std::fmt::Debug;

/// Handle to a node owned by an [`ElementTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Split a qualified name into its local part.
pub fn local_part(qualified: &str) -> &str {
    qualified
        .rsplit_once(':')
        .map_or(qualified, |(_, local)| local)
}

/// A queryable, mutable tree of elements with attributes and text.
///
/// Element names and attribute names are qualified (`w:r`, `w:ascii`);
/// lookups by tag compare local names only.
pub trait ElementTree: Debug {
    /// Root element of the document
    fn root(&self) -> NodeId;

    /// Parent of `node`, or `None` for the root and detached nodes
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Qualified element name, or `None` when `node` is not an element
    fn name(&self, node: NodeId) -> Option<&str>;

    /// All child nodes of `node` in document order, text included
    fn child_nodes(&self, node: NodeId) -> Vec<NodeId>;

    /// Read an attribute by qualified name
    fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Set an attribute by qualified name, replacing any existing value
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Concatenated text of every descendant text node
    fn text_content(&self, node: NodeId) -> String;

    /// Replace all children of `node` with a single text node
    fn set_text_content(&mut self, node: NodeId, text: &str);

    /// Replace `old` under `parent` with `replacements`, in order
    ///
    /// # Returns
    /// * `bool` - `false` when `old` is not a child of `parent`; the tree is
    ///   left unchanged in that case
    fn replace_child(&mut self, parent: NodeId, old: NodeId, replacements: &[NodeId]) -> bool;

    /// Copy an element; the copy is detached from the tree
    ///
    /// # Arguments
    /// * `node` - The element to copy
    /// * `deep` - Copy the whole subtree rather than only the element and its attributes
    fn clone_element(&mut self, node: NodeId, deep: bool) -> NodeId;

    /// Create a detached element with no attributes or children
    fn create_element(&mut self, name: &str) -> NodeId;

    /// Insert `child` under `parent` at `index`, detaching it from any
    /// previous parent. Indices past the end append.
    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId);

    /// Local name of an element
    fn local_name(&self, node: NodeId) -> Option<&str> {
        self.name(node).map(local_part)
    }

    /// Append `child` as the last child of `parent`
    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.child_nodes(parent).len();
        self.insert_child(parent, index, child);
    }

    /// Direct element children whose local name is `local`
    fn children(&self, node: NodeId, local: &str) -> Vec<NodeId> {
        self.child_nodes(node)
            .into_iter()
            .filter(|&child| self.local_name(child) == Some(local))
            .collect()
    }

    /// First direct element child whose local name is `local`
    fn first_child(&self, node: NodeId, local: &str) -> Option<NodeId> {
        self.child_nodes(node)
            .into_iter()
            .find(|&child| self.local_name(child) == Some(local))
    }

    /// Descendant elements (excluding `node`) whose local name is `local`,
    /// in document order
    fn descendants(&self, node: NodeId, local: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.child_nodes(node).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            if self.name(current).is_none() {
                continue;
            }
            if self.local_name(current) == Some(local) {
                found.push(current);
            }
            stack.extend(self.child_nodes(current).into_iter().rev());
        }
        found
    }

    /// First descendant element whose local name is `local`
    fn first_descendant(&self, node: NodeId, local: &str) -> Option<NodeId> {
        self.descendants(node, local).into_iter().next()
    }
}
