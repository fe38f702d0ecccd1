use compact_str::CompactString;

/// Index into the arena `Vec<Node>`. Uses u32 to save memory (supports up to ~4 billion nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Whether a node takes part in layout as a container or as a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Internal,
}

/// A single node of the hierarchy, stored in a flat arena.
#[derive(Debug, Clone)]
pub struct Node {
    /// Name, unique among siblings by convention (not enforced)
    pub name: CompactString,
    /// Weight. For leaves: from the input. For internal nodes: sum of children.
    pub value: f64,
    /// Parent node index (None for root)
    pub parent: Option<NodeId>,
    /// Children in layout order (value descending, input order on ties)
    pub children: Vec<NodeId>,
    /// Distance from the true root (root = 0)
    pub depth: u32,
    /// Distance to the deepest descendant leaf (leaf = 0)
    pub height: u32,
}

impl Node {
    pub fn new(name: &str, value: f64) -> Self {
        Self {
            name: CompactString::new(name),
            value,
            parent: None,
            children: Vec::new(),
            depth: 0,
            height: 0,
        }
    }

    pub fn kind(&self) -> NodeKind {
        if self.children.is_empty() {
            NodeKind::Leaf
        } else {
            NodeKind::Internal
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.kind() == NodeKind::Leaf
    }
}

/// The full hierarchy stored as a flat arena of nodes.
///
/// Children always have higher indices than their parents, so a reverse scan over
/// the arena visits every child before its parent.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Hierarchy {
    /// Create a hierarchy holding only a root node.
    pub fn new(root_name: &str) -> Self {
        Hierarchy {
            nodes: vec![Node::new(root_name, 0.0)],
            root: NodeId(0),
        }
    }

    /// Append a child under the given parent. Returns the new node's ID.
    pub fn add_child(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let new_id = NodeId(self.nodes.len() as u32);
        node.parent = Some(parent);
        node.depth = self.nodes[parent.index()].depth + 1;
        self.nodes[parent.index()].children.push(new_id);
        self.nodes.push(node);
        new_id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the hierarchy holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// First child of `parent` with the given name.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.get(c).name == name)
    }

    /// Walk from `id` up to the true root, `id` first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: Some(id),
        }
    }

    /// Pre-order walk of the subtree rooted at `id`, siblings in layout order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// Dotted path from the true root to `id`, the key used for zoom navigation.
    pub fn path_of(&self, id: NodeId) -> String {
        self.path_with(id, ".")
    }

    /// Ancestor names from the true root to `id`, joined by `separator`.
    pub fn path_with(&self, id: NodeId, separator: &str) -> String {
        let mut parts: Vec<&str> = self.ancestors(id).map(|a| self.get(a).name.as_str()).collect();
        parts.reverse();
        parts.join(separator)
    }
}

pub struct Ancestors<'a> {
    tree: &'a Hierarchy,
    current: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.tree.get(id).parent;
        Some(id)
    }
}

pub struct Descendants<'a> {
    tree: &'a Hierarchy,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
