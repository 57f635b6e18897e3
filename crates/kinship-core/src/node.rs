//! Node and link storage
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`]. Each
//! node has three independent link sets (parents, children, side). All
//! two-way operations keep both endpoints in step. Membership checks compare
//! the wrapped [`Person`], not the index.
//!
//! The arena does not cap any link set: "at most one partner" and "one
//! mother, one father" are rules of the relationship engine.

use crate::person::Person;

/// Stable index of a node inside a [`NodeArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which link set an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Parent,
    Child,
    Side,
}

/// Result of adding a two-way link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Created,
    AlreadyPresent,
}

/// Result of removing a two-way link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlinkOutcome {
    Removed,
    Absent,
}

/// A person plus its parent, child and side links
#[derive(Debug, Clone)]
pub struct Node {
    person: Person,
    parents: Vec<NodeId>,
    children: Vec<NodeId>,
    side: Vec<NodeId>,
}

impl Node {
    fn new(person: Person) -> Self {
        Self {
            person,
            parents: Vec::new(),
            children: Vec::new(),
            side: Vec::new(),
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub(crate) fn person_mut(&mut self) -> &mut Person {
        &mut self.person
    }

    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn side(&self) -> &[NodeId] {
        &self.side
    }

    /// First side link, the active partner in a family tree
    pub fn partner(&self) -> Option<NodeId> {
        self.side.first().copied()
    }

    pub fn parents_is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn children_is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn side_is_empty(&self) -> bool {
        self.side.is_empty()
    }

    fn links(&self, kind: LinkKind) -> &Vec<NodeId> {
        match kind {
            LinkKind::Parent => &self.parents,
            LinkKind::Child => &self.children,
            LinkKind::Side => &self.side,
        }
    }

    fn links_mut(&mut self, kind: LinkKind) -> &mut Vec<NodeId> {
        match kind {
            LinkKind::Parent => &mut self.parents,
            LinkKind::Child => &mut self.children,
            LinkKind::Side => &mut self.side,
        }
    }
}

/// Nodes compare by the person they wrap
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.person == other.person
    }
}

impl Eq for Node {}

/// Insertion-ordered node storage
///
/// A `NodeId` is only valid for the arena that issued it.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Store a new unlinked node and return its id
    pub fn insert(&mut self, person: Person) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(person));
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn person(&self, id: NodeId) -> &Person {
        self.get(id).person()
    }

    /// Iterate nodes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Membership
    // ─────────────────────────────────────────────────────────────────────────

    fn contains(&self, node: NodeId, kind: LinkKind, target: NodeId) -> bool {
        let wanted = self.get(target);
        self.get(node)
            .links(kind)
            .iter()
            .any(|&id| self.get(id) == wanted)
    }

    /// True if `node` lists `parent` among its parents
    pub fn contains_parent_link(&self, node: NodeId, parent: NodeId) -> bool {
        self.contains(node, LinkKind::Parent, parent)
    }

    /// True if `node` lists `child` among its children
    pub fn contains_child_link(&self, node: NodeId, child: NodeId) -> bool {
        self.contains(node, LinkKind::Child, child)
    }

    /// True if `node` lists `side` among its side links
    pub fn contains_side_link(&self, node: NodeId, side: NodeId) -> bool {
        self.contains(node, LinkKind::Side, side)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // One-way primitives
    // ─────────────────────────────────────────────────────────────────────────

    fn add_one_way(&mut self, node: NodeId, kind: LinkKind, target: NodeId) -> LinkOutcome {
        if self.contains(node, kind, target) {
            return LinkOutcome::AlreadyPresent;
        }
        self.get_mut(node).links_mut(kind).push(target);
        LinkOutcome::Created
    }

    fn remove_one_way(&mut self, node: NodeId, kind: LinkKind, target: NodeId) -> UnlinkOutcome {
        let wanted = self.get(target).person().key().clone();
        let position = self
            .get(node)
            .links(kind)
            .iter()
            .position(|&id| self.person(id).key() == &wanted);

        match position {
            Some(pos) => {
                self.get_mut(node).links_mut(kind).remove(pos);
                UnlinkOutcome::Removed
            }
            None => UnlinkOutcome::Absent,
        }
    }

    fn add_two_way(
        &mut self,
        a: NodeId,
        a_kind: LinkKind,
        b: NodeId,
        b_kind: LinkKind,
    ) -> LinkOutcome {
        let first = self.add_one_way(a, a_kind, b);
        let second = self.add_one_way(b, b_kind, a);
        if first == LinkOutcome::AlreadyPresent && second == LinkOutcome::AlreadyPresent {
            tracing::debug!("Link {} -> {} already present ({:?})", a, b, a_kind);
            LinkOutcome::AlreadyPresent
        } else {
            LinkOutcome::Created
        }
    }

    fn remove_two_way(
        &mut self,
        a: NodeId,
        a_kind: LinkKind,
        b: NodeId,
        b_kind: LinkKind,
    ) -> UnlinkOutcome {
        let first = self.remove_one_way(a, a_kind, b);
        let second = self.remove_one_way(b, b_kind, a);
        if first == UnlinkOutcome::Absent && second == UnlinkOutcome::Absent {
            tracing::debug!("Link {} -> {} absent ({:?})", a, b, a_kind);
            UnlinkOutcome::Absent
        } else {
            UnlinkOutcome::Removed
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Two-way links
    // ─────────────────────────────────────────────────────────────────────────

    /// Link `child` to `parent` in both directions
    pub fn add_parent_link(&mut self, child: NodeId, parent: NodeId) -> LinkOutcome {
        self.add_two_way(child, LinkKind::Parent, parent, LinkKind::Child)
    }

    /// Link `parent` to `child` in both directions; same edge as `add_parent_link`
    pub fn add_child_link(&mut self, parent: NodeId, child: NodeId) -> LinkOutcome {
        self.add_parent_link(child, parent)
    }

    /// Link two nodes as equals (partners)
    pub fn add_side_link(&mut self, a: NodeId, b: NodeId) -> LinkOutcome {
        self.add_two_way(a, LinkKind::Side, b, LinkKind::Side)
    }

    pub fn remove_parent_link(&mut self, child: NodeId, parent: NodeId) -> UnlinkOutcome {
        self.remove_two_way(child, LinkKind::Parent, parent, LinkKind::Child)
    }

    pub fn remove_child_link(&mut self, parent: NodeId, child: NodeId) -> UnlinkOutcome {
        self.remove_parent_link(child, parent)
    }

    pub fn remove_side_link(&mut self, a: NodeId, b: NodeId) -> UnlinkOutcome {
        self.remove_two_way(a, LinkKind::Side, b, LinkKind::Side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_with(names: &[&str]) -> (NodeArena, Vec<NodeId>) {
        let mut arena = NodeArena::new();
        let ids = names
            .iter()
            .map(|name| arena.insert(Person::new(*name, "2000-01-01", "Nowhere")))
            .collect();
        (arena, ids)
    }

    #[test]
    fn test_parent_link_is_bidirectional() {
        let (mut arena, ids) = arena_with(&["Carol", "Alice"]);
        let (carol, alice) = (ids[0], ids[1]);

        assert_eq!(arena.add_parent_link(carol, alice), LinkOutcome::Created);
        assert!(arena.contains_parent_link(carol, alice));
        assert!(arena.contains_child_link(alice, carol));
        assert!(!arena.get(carol).parents_is_empty());
        assert!(arena.get(carol).children_is_empty());
    }

    #[test]
    fn test_child_link_is_the_same_edge() {
        let (mut arena, ids) = arena_with(&["Carol", "Alice"]);
        let (carol, alice) = (ids[0], ids[1]);

        arena.add_child_link(alice, carol);
        assert_eq!(arena.add_parent_link(carol, alice), LinkOutcome::AlreadyPresent);
        assert_eq!(arena.get(carol).parents().len(), 1);
        assert_eq!(arena.get(alice).children().len(), 1);
    }

    #[test]
    fn test_side_link_is_symmetric_and_uncapped() {
        let (mut arena, ids) = arena_with(&["Alice", "Bob", "Carla"]);

        assert_eq!(arena.add_side_link(ids[0], ids[1]), LinkOutcome::Created);
        assert_eq!(arena.add_side_link(ids[1], ids[0]), LinkOutcome::AlreadyPresent);
        assert!(arena.contains_side_link(ids[1], ids[0]));

        // The arena itself allows more than one side link
        assert_eq!(arena.add_side_link(ids[0], ids[2]), LinkOutcome::Created);
        assert_eq!(arena.get(ids[0]).side().len(), 2);
        assert_eq!(arena.get(ids[0]).partner(), Some(ids[1]));
    }

    #[test]
    fn test_remove_links() {
        let (mut arena, ids) = arena_with(&["Carol", "Alice"]);
        let (carol, alice) = (ids[0], ids[1]);

        arena.add_parent_link(carol, alice);
        assert_eq!(arena.remove_child_link(alice, carol), UnlinkOutcome::Removed);
        assert!(!arena.contains_parent_link(carol, alice));
        assert!(!arena.contains_child_link(alice, carol));

        // Removing again is a reported no-op
        assert_eq!(arena.remove_parent_link(carol, alice), UnlinkOutcome::Absent);

        arena.add_side_link(carol, alice);
        assert_eq!(arena.remove_side_link(alice, carol), UnlinkOutcome::Removed);
        assert!(arena.get(carol).side_is_empty());
        assert!(arena.get(alice).side_is_empty());
    }

    #[test]
    fn test_containment_uses_person_equality() {
        let mut arena = NodeArena::new();
        let carol = arena.insert(Person::new("Carol", "2005-01-01", "Leeds"));
        let alice = arena.insert(Person::new("Alice", "1980-01-01", "Leeds"));
        // Same identity, different birthplace: a look-alike node
        let alice_again = arena.insert(Person::new("Alice", "1980-01-01", "York"));

        arena.add_parent_link(carol, alice);
        assert!(arena.contains_parent_link(carol, alice_again));
        assert_eq!(arena.get(alice), arena.get(alice_again));
    }

    #[test]
    fn test_iter_preserves_insertion_order() {
        let (arena, ids) = arena_with(&["A", "B", "C"]);
        let seen: Vec<_> = arena.iter().map(|(id, _)| id).collect();
        assert_eq!(seen, ids);
        assert_eq!(arena.len(), 3);
    }
}
