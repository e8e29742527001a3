//! Arena for one declared view tree.

/// Name of the synthetic node every hierarchy hangs from.
pub const ROOT_NAME: &str = "$root";

/// Index of a node inside its [`ViewHierarchy`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One named position in a declared tree.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub name:     String,
    /// Leading whitespace count of the source line. Only meaningful while parsing.
    pub indent:   usize,
    pub children: Vec<NodeId>,
    pub parent:   Option<NodeId>,
}

/// Nodes in insertion order; index 0 is the synthetic root.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewHierarchy {
    nodes: Vec<HierarchyNode>,
}

impl Default for ViewHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewHierarchy {
    pub fn new() -> Self {
        Self {
            nodes: vec![HierarchyNode {
                name:     ROOT_NAME.to_string(),
                indent:   0,
                children: Vec::new(),
                parent:   None,
            }],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &HierarchyNode {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Number of nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing hangs from the root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>, indent: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(HierarchyNode {
            name: name.into(),
            indent,
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Every node below the root, level by level.
    pub fn breadth_first(&self) -> Vec<NodeId> {
        let mut queue: Vec<NodeId> = self.children(self.root()).to_vec();
        let mut i = 0;
        while i < queue.len() {
            queue.extend_from_slice(self.children(queue[i]));
            i += 1;
        }
        queue
    }

    /// Last node added under `name`.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().rposition(|n| n.name == name).map(NodeId)
    }

    /// Indented outline of the tree below the root, two spaces per level.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.outline_into(self.root(), 0, &mut out);
        out
    }

    fn outline_into(&self, id: NodeId, depth: usize, out: &mut String) {
        for &child in self.children(id) {
            out.push_str(&"  ".repeat(depth));
            out.push_str(self.name(child));
            out.push('\n');
            self.outline_into(child, depth + 1, out);
        }
    }
}
