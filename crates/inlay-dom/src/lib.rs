//! DOM tree implementation for the inlay renderer.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.
//!
//! Nodes are never freed: removing a node only detaches it. A detached
//! subtree stays addressable by its ids, which is what lets a parsed
//! fragment be edited before its nodes are imported into a live page.

mod attributes;
mod serialize;

pub use attributes::AttributesMap;
pub use serialize::{inner_html, outer_html};

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors raised by tree mutations.
///
/// These correspond to the `DOMException`s the DOM Standard throws from the
/// mutation algorithms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The id does not name a node of this tree.
    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),
    /// "If child's parent is not parent, then throw a `NotFoundError`."
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// The expected parent.
        parent: NodeId,
        /// The node that was not its child.
        child: NodeId,
    },
    /// "If node is a host-including inclusive ancestor of parent, then throw
    /// a `HierarchyRequestError`."
    #[error("inserting {node} under {parent} would create a cycle")]
    HierarchyRequest {
        /// The node being inserted.
        node: NodeId,
        /// The intended parent.
        parent: NodeId,
    },
    /// [§ 4.9 attachShadow](https://dom.spec.whatwg.org/#dom-element-attachshadow)
    /// "If element is a shadow host, then throw a `NotSupportedError`."
    #[error("element {0} already hosts a shadow root")]
    ShadowRootAlreadyAttached(NodeId),
    /// The operation requires an element.
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
/// "Each node has an associated node document... and parent (null or an element)."
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    /// "An object A's next sibling is the object immediately following A
    /// in the children of A's parent."
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    /// "An object A's previous sibling is the object immediately preceding A
    /// in the children of A's parent."
    pub prev_sibling: Option<NodeId>,

    /// [§ 4.2.2.2](https://dom.spec.whatwg.org/#element-shadow-root)
    /// "An element has an associated shadow root (null or a shadow root)."
    pub shadow_root: Option<NodeId>,
}

impl Node {
    const fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
            shadow_root: None,
        }
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    /// "A document whose type is "html" is known as an HTML document."
    Document,
    /// [§ 4.7 Interface DocumentFragment](https://dom.spec.whatwg.org/#interface-documentfragment)
    /// "A `DocumentFragment` node has an associated host (null or an element
    /// in a different node tree)."
    DocumentFragment,
    /// [§ 4.8 Interface ShadowRoot](https://dom.spec.whatwg.org/#interface-shadowroot)
    /// "Shadow roots's associated host is never null."
    ShadowRoot {
        /// The element this root is attached to.
        host: NodeId,
    },
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// "Text nodes are known as text."
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    /// "Comment nodes are known as comments."
    Comment(String),
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// - "Elements have an associated namespace, namespace prefix, local name, custom element state,
///   custom element definition, is value."
/// - "When an element is created, its local name is always given."
///
/// NOTE: We only store `tag_name` (local name) and attrs.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: AttributesMap::new(),
        }
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id")
    }

    /// Whether this element's local name is `tag`, ASCII case-insensitively.
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. This provides:
/// - O(1) access to any node by `NodeId`
/// - O(1) parent/sibling traversal
/// - No borrowing issues (indices instead of references)
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeType::Document)],
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes ever allocated in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.0).ok_or(DomError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(id.0).ok_or(DomError::NodeNotFound(id))
    }

    // ------------------------------------------------------------------
    // Node creation
    // ------------------------------------------------------------------

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(node_type));
        id
    }

    /// [§ 4.5 createElement](https://dom.spec.whatwg.org/#dom-document-createelement)
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(
            tag_name.to_ascii_lowercase(),
        )))
    }

    /// [§ 4.5 createTextNode](https://dom.spec.whatwg.org/#dom-document-createtextnode)
    pub fn create_text(&mut self, data: impl Into<String>) -> NodeId {
        self.alloc(NodeType::Text(data.into()))
    }

    /// [§ 4.5 createComment](https://dom.spec.whatwg.org/#dom-document-createcomment)
    pub fn create_comment(&mut self, data: impl Into<String>) -> NodeId {
        self.alloc(NodeType::Comment(data.into()))
    }

    /// [§ 4.5 createDocumentFragment](https://dom.spec.whatwg.org/#dom-document-createdocumentfragment)
    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeType::DocumentFragment)
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// [§ 4.2.3 Mutation algorithms](https://dom.spec.whatwg.org/#mutation-algorithms)
    ///
    /// "If node is a host-including inclusive ancestor of parent, then throw a
    /// `HierarchyRequestError`."
    fn ensure_pre_insertion_validity(&self, parent: NodeId, node: NodeId) -> Result<(), DomError> {
        let _ = self.node(parent)?;
        let _ = self.node(node)?;
        if node == parent || self.is_descendant_of(parent, node) {
            return Err(DomError::HierarchyRequest { node, parent });
        }
        Ok(())
    }

    /// Remove `node` from its parent, if it has one.
    ///
    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeNotFound`] if `node` is not in this tree.
    pub fn detach(&mut self, node: NodeId) -> Result<(), DomError> {
        match self.node(node)?.parent {
            Some(parent) => self.remove_child(parent, node),
            None => Ok(()),
        }
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent`, updating all
    /// relationships. A child that already has a parent is moved.
    /// Appending a `DocumentFragment` moves its children instead.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeNotFound`] for unknown ids and
    /// [`DomError::HierarchyRequest`] if `child` is an ancestor of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before_impl(parent, child, None)
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Inserts `new_child` into `parent` immediately before `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAChild`] if `reference` is not a child of
    /// `parent`, plus the errors of [`DomTree::append_child`].
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        reference: NodeId,
    ) -> Result<(), DomError> {
        self.insert_before_impl(parent, new_child, Some(reference))
    }

    fn insert_before_impl(
        &mut self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        self.ensure_pre_insertion_validity(parent, node)?;
        if let Some(reference) = reference
            && self.node(reference)?.parent != Some(parent)
        {
            return Err(DomError::NotAChild {
                parent,
                child: reference,
            });
        }

        // "If node is a DocumentFragment node, then ... insert its children."
        if matches!(self.node(node)?.node_type, NodeType::DocumentFragment) {
            let moved = self.node(node)?.children.clone();
            for child in moved {
                self.insert_before_impl(parent, child, reference)?;
            }
            return Ok(());
        }

        // "If reference child is node, then set it to node's next sibling."
        let reference = match reference {
            Some(r) if r == node => self.node(node)?.next_sibling,
            other => other,
        };

        self.detach(node)?;

        let index = match reference {
            Some(r) => self
                .node(parent)?
                .children
                .iter()
                .position(|&c| c == r)
                .ok_or(DomError::NotAChild { parent, child: r })?,
            None => self.node(parent)?.children.len(),
        };

        self.node_mut(parent)?.children.insert(index, node);
        self.relink_children(parent)?;
        self.node_mut(node)?.parent = Some(parent);
        Ok(())
    }

    /// [§ 4.2.3 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Removes `child` from `parent`. The child keeps its own subtree and
    /// stays addressable; it just has no parent or siblings afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAChild`] if `child`'s parent is not `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.node(child)?.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        self.node_mut(parent)?.children.retain(|&c| c != child);
        self.relink_children(parent)?;

        let node = self.node_mut(child)?;
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
        Ok(())
    }

    /// [§ 4.2.3 Replace](https://dom.spec.whatwg.org/#concept-node-replace)
    ///
    /// Replaces `old_child` (a child of `parent`) with `new_child` at the same
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAChild`] if `old_child` is not a child of
    /// `parent`, plus the insertion errors of [`DomTree::insert_before`].
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> Result<(), DomError> {
        if new_child == old_child {
            return Ok(());
        }
        self.insert_before(parent, new_child, old_child)?;
        self.remove_child(parent, old_child)
    }

    /// `ChildNode.replaceWith()`: replace `node` in its parent by `replacement`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeNotFound`] if `node` has no parent.
    pub fn replace_with(&mut self, node: NodeId, replacement: NodeId) -> Result<(), DomError> {
        let parent = self.node(node)?.parent.ok_or(DomError::NodeNotFound(node))?;
        self.replace_child(parent, replacement, node)
    }

    /// Move every child of `from` to the end of `to`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`DomTree::append_child`].
    pub fn move_children(&mut self, from: NodeId, to: NodeId) -> Result<(), DomError> {
        let moved = self.node(from)?.children.clone();
        for child in moved {
            self.append_child(to, child)?;
        }
        Ok(())
    }

    /// Remove every child of `parent`, one at a time, last child first.
    ///
    /// Calling this on a node without children is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeNotFound`] if `parent` is not in this tree.
    pub fn clear_children(&mut self, parent: NodeId) -> Result<(), DomError> {
        while let Some(child) = self.node(parent)?.children.last().copied() {
            self.remove_child(parent, child)?;
        }
        Ok(())
    }

    /// Rebuild the sibling links of `parent`'s children from its child list.
    fn relink_children(&mut self, parent: NodeId) -> Result<(), DomError> {
        let children = self.node(parent)?.children.clone();
        for (i, &child) in children.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| children[p]);
            let next = children.get(i + 1).copied();
            let node = self.node_mut(child)?;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Text and attributes
    // ------------------------------------------------------------------

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// "The descendant text content of a node node is the concatenation of
    /// the data of all the Text node descendants of node, in tree order."
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        match self.get(id).map(|n| &n.node_type) {
            Some(NodeType::Text(data) | NodeType::Comment(data)) => data.clone(),
            Some(_) => self
                .descendants(id)
                .filter_map(|d| self.as_text(d))
                .collect(),
            None => String::new(),
        }
    }

    /// [§ 4.4 String replace all](https://dom.spec.whatwg.org/#string-replace-all)
    ///
    /// "Let node be null. If string is not the empty string, then set node to
    /// a new Text node whose data is string. Replace all with node within
    /// parent."
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeNotFound`] if `id` is not in this tree.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        match &mut self.node_mut(id)?.node_type {
            NodeType::Text(data) | NodeType::Comment(data) => {
                text.clone_into(data);
                return Ok(());
            }
            _ => {}
        }
        self.clear_children(id)?;
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node)?;
        }
        Ok(())
    }

    /// Set an attribute on an element.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAnElement`] if `id` is not an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.as_element_mut(id)
            .ok_or(DomError::NotAnElement(id))?
            .attrs
            .insert(name, value);
        Ok(())
    }

    /// Get an attribute of an element.
    #[must_use]
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id).and_then(|e| e.attrs.get(name))
    }

    // ------------------------------------------------------------------
    // Cross-tree import
    // ------------------------------------------------------------------

    /// [§ 4.5 importNode](https://dom.spec.whatwg.org/#dom-document-importnode)
    ///
    /// "Return a clone of node, with this and the clone children flag set if
    /// deep is true."
    ///
    /// Deep-copies `node` from `source` into this tree and returns the id of
    /// the (detached) copy. Shadow roots are not cloned, matching
    /// "clone a node" for non-clonable shadow roots.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeNotFound`] if `node` is not in `source`.
    pub fn import_node(&mut self, source: &Self, node: NodeId) -> Result<NodeId, DomError> {
        let source_node = source.node(node)?;
        let node_type = match &source_node.node_type {
            // A document cannot be inserted anywhere; its clone is a fragment.
            NodeType::Document | NodeType::ShadowRoot { .. } => NodeType::DocumentFragment,
            other => other.clone(),
        };
        let copy = self.alloc(node_type);
        for &child in &source_node.children {
            let child_copy = self.import_node(source, child)?;
            self.append_child(copy, child_copy)?;
        }
        Ok(copy)
    }

    // ------------------------------------------------------------------
    // Shadow roots
    // ------------------------------------------------------------------

    /// [§ 4.9 attachShadow](https://dom.spec.whatwg.org/#dom-element-attachshadow)
    ///
    /// STEP: "If element is a shadow host, then throw a `NotSupportedError`."
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NotAnElement`] if `host` is not an element and
    /// [`DomError::ShadowRootAlreadyAttached`] if it already has one.
    pub fn attach_shadow(&mut self, host: NodeId) -> Result<NodeId, DomError> {
        if self.as_element(host).is_none() {
            return Err(DomError::NotAnElement(host));
        }
        if self.node(host)?.shadow_root.is_some() {
            return Err(DomError::ShadowRootAlreadyAttached(host));
        }
        let shadow = self.alloc(NodeType::ShadowRoot { host });
        self.node_mut(host)?.shadow_root = Some(shadow);
        Ok(shadow)
    }

    /// The shadow root attached to `host`, if any.
    #[must_use]
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.get(host).and_then(|n| n.shadow_root)
    }

    /// The host of `shadow_root`, if it is a shadow root.
    #[must_use]
    pub fn shadow_host(&self, shadow_root: NodeId) -> Option<NodeId> {
        match self.get(shadow_root).map(|n| &n.node_type) {
            Some(NodeType::ShadowRoot { host }) => Some(*host),
            _ => None,
        }
    }

    /// [§ 4.2.2 Root](https://dom.spec.whatwg.org/#concept-tree-root)
    ///
    /// "The root of an object is itself, if its parent is null, or else it
    /// is the root of its parent."
    #[must_use]
    pub fn tree_root(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// The shadow root whose tree contains `id`, if `id` lives in a shadow tree.
    #[must_use]
    pub fn containing_shadow_root(&self, id: NodeId) -> Option<NodeId> {
        let root = self.tree_root(id);
        self.shadow_host(root).map(|_| root)
    }

    /// [§ 4.2.2 Connected](https://dom.spec.whatwg.org/#connected)
    ///
    /// "An element is connected if its shadow-including root is a document."
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            let root = self.tree_root(current);
            if root == NodeId::ROOT {
                return true;
            }
            match self.shadow_host(root) {
                Some(host) => current = host,
                None => return false,
            }
        }
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// [§ 4.2.1 Tree order](https://dom.spec.whatwg.org/#concept-tree-order)
    ///
    /// "Tree order is preorder, depth-first traversal of a tree."
    ///
    /// Iterates the descendants of `id` (excluding `id` itself) in tree
    /// order. Shadow trees are not entered.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        DescendantIterator { tree: self, stack }
    }

    /// Elements under `root` whose local name is `tag`, in tree order.
    #[must_use]
    pub fn elements_by_tag_name(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(root)
            .filter(|&id| self.as_element(id).is_some_and(|e| e.is(tag)))
            .collect()
    }

    /// [§ 5.1 getElementById](https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid)
    ///
    /// STEP 1: "If elementId is the empty string, return null."
    /// STEP 2: "Return the first element in tree order within node's descendants
    ///          whose ID is elementId; otherwise, return null."
    #[must_use]
    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        if element_id.is_empty() {
            return None;
        }
        self.descendants(NodeId::ROOT)
            .find(|&id| self.as_element(id).and_then(ElementData::id) == Some(element_id))
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get the data of a comment node.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Comment(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    ///
    /// In practice for HTML documents, this is the `<html>` element.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// [§ 3.1.3 The head element](https://html.spec.whatwg.org/multipage/dom.html#the-head-element-2)
    ///
    /// "The head element of a document is the first head element that is a
    /// child of the html element, if there is one, or null otherwise."
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.children(html)
            .iter()
            .find(|&&id| self.as_element(id).is_some_and(|e| e.is("head")))
            .copied()
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's children
    /// that is either a body element or a frameset element, or null if there is
    /// no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;

        self.children(html)
            .iter()
            .find(|&&id| {
                self.as_element(id)
                    .is_some_and(|e| e.is("body") || e.is("frameset"))
            })
            .copied()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
