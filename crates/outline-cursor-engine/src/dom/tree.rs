use super::{InlineStyle, NodeId, NodeKind, Project, ProjectId, RenderTree};

#[derive(Debug, Clone)]
struct Slot {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed render tree.
///
/// Node ids are indices into the arena and stay valid for the lifetime of the
/// tree; detached nodes keep their slot but are no longer reachable.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Slot>,
    root: NodeId,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Empty outline: just the root sentinel and its child list.
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.push(
            None,
            NodeKind::Project(Project {
                id: ProjectId::from("root"),
                is_open: true,
                is_root: true,
            }),
        );
        tree.push(Some(tree.root), NodeKind::Children);
        tree
    }

    /// The tree-root sentinel.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of arena slots, detached nodes included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.child_projects(self.root).is_empty()
    }

    /// Appends a closed outline node with a generated id and one plain text
    /// segment (none when `text` is empty).
    pub fn add_project(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.add_project_with_id(parent, ProjectId::generate(), text)
    }

    pub fn add_project_with_id(&mut self, parent: NodeId, id: ProjectId, text: &str) -> NodeId {
        let list = self.child_list_or_insert(parent);
        let project = self.push(
            Some(list),
            NodeKind::Project(Project {
                id,
                is_open: false,
                is_root: false,
            }),
        );
        let name = self.push(Some(project), NodeKind::Name);
        let content = self.push(Some(name), NodeKind::Content);
        if !text.is_empty() {
            self.append_text(content, text);
        }
        self.push(Some(project), NodeKind::Children);
        project
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(Some(parent), NodeKind::Text(text.to_string()))
    }

    pub fn append_span(&mut self, parent: NodeId, style: InlineStyle) -> NodeId {
        self.push(Some(parent), NodeKind::Span(style))
    }

    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(Some(parent), NodeKind::Comment(text.to_string()))
    }

    /// Unlinks `node` from its parent. Returns false when it had none.
    pub fn detach(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.slot(node).and_then(|slot| slot.parent) else {
            return false;
        };
        self.nodes[parent.0].children.retain(|&child| child != node);
        self.nodes[node.0].parent = None;
        true
    }

    /// Sets the open flag of an outline node. Returns false for non-projects.
    pub fn set_open(&mut self, node: NodeId, open: bool) -> bool {
        match self.nodes.get_mut(node.0).map(|slot| &mut slot.kind) {
            Some(NodeKind::Project(project)) => {
                project.is_open = open;
                true
            }
            _ => false,
        }
    }

    pub fn toggle_open(&mut self, node: NodeId) -> bool {
        match self.project(node).map(|project| project.is_open) {
            Some(open) => self.set_open(node, !open),
            None => false,
        }
    }

    /// Content container of an outline node (`Name > Content`).
    pub fn content(&self, project: NodeId) -> Option<NodeId> {
        let name = self.child_of_kind(project, |kind| *kind == NodeKind::Name)?;
        self.child_of_kind(name, |kind| *kind == NodeKind::Content)
    }

    /// Child outline nodes in order.
    pub fn child_projects(&self, project: NodeId) -> Vec<NodeId> {
        self.child_of_kind(project, |kind| *kind == NodeKind::Children)
            .map(|list| {
                self.children(list)
                    .iter()
                    .copied()
                    .filter(|&child| self.project(child).is_some())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Text-bearing leaves below `node`, in document order.
    pub fn segments(&self, node: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if self.kind(current).is_some_and(NodeKind::is_text) {
                found.push(current);
            }
            stack.extend(self.children(current).iter().rev());
        }
        found
    }

    /// Concatenated text below `node`.
    pub fn text(&self, node: NodeId) -> String {
        self.segments(node)
            .into_iter()
            .filter_map(|segment| match self.kind(segment) {
                Some(NodeKind::Text(text)) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn find_project(&self, id: &ProjectId) -> Option<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .find(|&node| self.project(node).is_some_and(|project| &project.id == id))
    }

    /// Outline nodes a reader can currently see, in display order, paired
    /// with their depth (top-level nodes are depth 0).
    pub fn visible_projects(&self) -> Vec<(NodeId, usize)> {
        let mut visible = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = self
            .child_projects(self.root)
            .into_iter()
            .rev()
            .map(|node| (node, 0))
            .collect();
        while let Some((node, depth)) = stack.pop() {
            visible.push((node, depth));
            if self.project(node).is_some_and(|project| project.is_open) {
                stack.extend(
                    self.child_projects(node)
                        .into_iter()
                        .rev()
                        .map(|child| (child, depth + 1)),
                );
            }
        }
        visible
    }

    fn child_list_or_insert(&mut self, parent: NodeId) -> NodeId {
        if self.kind(parent) == Some(&NodeKind::Children) {
            return parent;
        }
        match self.child_of_kind(parent, |kind| *kind == NodeKind::Children) {
            Some(list) => list,
            None => self.push(Some(parent), NodeKind::Children),
        }
    }

    fn child_of_kind(&self, node: NodeId, test: impl Fn(&NodeKind) -> bool) -> Option<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .find(|&child| self.kind(child).is_some_and(&test))
    }

    fn slot(&self, node: NodeId) -> Option<&Slot> {
        self.nodes.get(node.0)
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Slot {
            kind,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }
}

impl RenderTree for DomTree {
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slot(node).and_then(|slot| slot.parent)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.slot(node)
            .map(|slot| slot.children.as_slice())
            .unwrap_or(&[])
    }

    fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.slot(node).map(|slot| &slot.kind)
    }
}
