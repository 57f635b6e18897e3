//! The family tree: node ownership, lookup and mutations
//!
//! People are only ever added, never removed. Links and role flags change
//! through the mutation methods below, each of which checks every
//! precondition before it touches the arena.

use crate::error::{Error, Result};
use crate::limits::{validate_birthplace, validate_date_of_birth, validate_name};
use crate::node::{LinkOutcome, NodeArena, NodeId, UnlinkOutcome};
use crate::person::{Person, PersonKey};
use std::collections::HashMap;

/// Which parent role a link assigns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRole {
    Mother,
    Father,
}

impl ParentRole {
    fn as_str(self) -> &'static str {
        match self {
            Self::Mother => "mother",
            Self::Father => "father",
        }
    }

    fn holds(self, person: &Person) -> bool {
        match self {
            Self::Mother => person.is_mother(),
            Self::Father => person.is_father(),
        }
    }

    fn opposite(self) -> Self {
        match self {
            Self::Mother => Self::Father,
            Self::Father => Self::Mother,
        }
    }
}

/// Genealogical graph of people linked by parent/child and partner edges
#[derive(Debug, Clone, Default)]
pub struct FamilyTree {
    pub(crate) arena: NodeArena,
    index: HashMap<PersonKey, NodeId>,
}

impl FamilyTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of people in the tree
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn contains(&self, key: &PersonKey) -> bool {
        self.index.contains_key(key)
    }

    /// People in insertion order
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.arena.iter().map(|(_, node)| node.person())
    }

    /// Snapshot of one person
    pub fn person(&self, key: &PersonKey) -> Result<Person> {
        let id = self.resolve(key)?;
        Ok(self.arena.person(id).clone())
    }

    /// Direct access to the link layer
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub(crate) fn resolve(&self, key: &PersonKey) -> Result<NodeId> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| Error::NotFound(key.clone()))
    }

    pub(crate) fn key_of(&self, id: NodeId) -> &PersonKey {
        self.arena.person(id).key()
    }

    /// Parent of `id` holding the given role flag, if any
    pub(crate) fn parent_with_role(&self, id: NodeId, role: ParentRole) -> Option<NodeId> {
        self.arena
            .get(id)
            .parents()
            .iter()
            .copied()
            .find(|&parent| role.holds(self.arena.person(parent)))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a new person. Fails with `AlreadyExists` if the key is taken.
    pub fn add_person(&mut self, person: Person) -> Result<()> {
        validate_name(person.name())?;
        validate_date_of_birth(person.date_of_birth())?;
        validate_birthplace(person.birthplace())?;

        let key = person.key().clone();
        if self.index.contains_key(&key) {
            tracing::debug!("Rejected duplicate person {}", key);
            return Err(Error::AlreadyExists(key));
        }

        // Role flags only ever come from mutations on this tree
        let person = Person::new(person.name(), person.date_of_birth(), person.birthplace());
        let id = self.arena.insert(person);
        self.index.insert(key.clone(), id);
        tracing::info!("Added person {}", key);
        Ok(())
    }

    /// Record `mother` as the mother of `child`
    pub fn link_mother(&mut self, child: &PersonKey, mother: &PersonKey) -> Result<()> {
        self.link_parent(child, mother, ParentRole::Mother)
    }

    /// Record `father` as the father of `child`
    pub fn link_father(&mut self, child: &PersonKey, father: &PersonKey) -> Result<()> {
        self.link_parent(child, father, ParentRole::Father)
    }

    fn link_parent(&mut self, child: &PersonKey, parent: &PersonKey, role: ParentRole) -> Result<()> {
        tracing::debug!("Linking {} as {} of {}", parent, role.as_str(), child);

        let child_id = self.resolve(child)?;
        let parent_id = self.resolve(parent)?;

        if child_id == parent_id {
            return Err(Error::InvalidArgument(format!(
                "{} cannot be their own {}",
                child,
                role.as_str()
            )));
        }
        if self.parent_with_role(child_id, role).is_some() {
            return Err(match role {
                ParentRole::Mother => Error::AlreadyHasMother(child.clone()),
                ParentRole::Father => Error::AlreadyHasFather(child.clone()),
            });
        }
        if self.arena.contains_child_link(parent_id, child_id) {
            return Err(Error::AlreadyLinked {
                child: child.clone(),
                parent: parent.clone(),
            });
        }
        if role.opposite().holds(self.arena.person(parent_id)) {
            return Err(Error::RoleConflict {
                person: parent.clone(),
                role: role.opposite().as_str(),
            });
        }

        let person = self.arena.get_mut(parent_id).person_mut();
        match role {
            ParentRole::Mother => person.mark_mother(),
            ParentRole::Father => person.mark_father(),
        }
        let outcome = self.arena.add_parent_link(child_id, parent_id);
        debug_assert_eq!(outcome, LinkOutcome::Created);

        tracing::info!("Linked {} as {} of {}", parent, role.as_str(), child);
        Ok(())
    }

    /// Record a marriage between two unpartnered people
    pub fn record_wedding(&mut self, first: &PersonKey, second: &PersonKey) -> Result<()> {
        tracing::debug!("Recording wedding of {} and {}", first, second);

        let a = self.resolve(first)?;
        let b = self.resolve(second)?;

        if a == b {
            return Err(Error::InvalidArgument(format!(
                "{} cannot marry themselves",
                first
            )));
        }
        if !self.arena.get(a).side_is_empty() {
            return Err(Error::AlreadyPartnered(first.clone()));
        }
        if !self.arena.get(b).side_is_empty() {
            return Err(Error::AlreadyPartnered(second.clone()));
        }

        self.arena.get_mut(a).person_mut().mark_married();
        self.arena.get_mut(b).person_mut().mark_married();
        self.arena.add_side_link(a, b);

        tracing::info!("Recorded wedding of {} and {}", first, second);
        Ok(())
    }

    /// Record the divorce of a couple who are currently partnered
    pub fn record_divorce(&mut self, first: &PersonKey, second: &PersonKey) -> Result<()> {
        tracing::debug!("Recording divorce of {} and {}", first, second);

        let a = self.resolve(first)?;
        let b = self.resolve(second)?;

        if !self.arena.contains_side_link(a, b) || !self.arena.contains_side_link(b, a) {
            return Err(Error::NotPartnered {
                first: first.clone(),
                second: second.clone(),
            });
        }

        let outcome = self.arena.remove_side_link(a, b);
        debug_assert_eq!(outcome, UnlinkOutcome::Removed);
        self.arena.get_mut(a).person_mut().mark_divorced();
        self.arena.get_mut(b).person_mut().mark_divorced();

        tracing::info!("Recorded divorce of {} and {}", first, second);
        Ok(())
    }

    /// Mark a person as adopted. Parent links are recorded separately.
    pub fn record_adoption(&mut self, key: &PersonKey) -> Result<()> {
        let id = self.resolve(key)?;
        self.arena.get_mut(id).person_mut().mark_adopted();
        tracing::info!("Recorded adoption of {}", key);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Predicates
    // ─────────────────────────────────────────────────────────────────────────

    pub fn has_mother(&self, key: &PersonKey) -> Result<bool> {
        let id = self.resolve(key)?;
        Ok(self.parent_with_role(id, ParentRole::Mother).is_some())
    }

    pub fn has_father(&self, key: &PersonKey) -> Result<bool> {
        let id = self.resolve(key)?;
        Ok(self.parent_with_role(id, ParentRole::Father).is_some())
    }

    pub fn has_partner(&self, key: &PersonKey) -> Result<bool> {
        let id = self.resolve(key)?;
        Ok(self.arena.get(id).partner().is_some())
    }

    /// Current partner, if any
    pub fn partner(&self, key: &PersonKey) -> Result<Option<Person>> {
        let id = self.resolve(key)?;
        Ok(self
            .arena
            .get(id)
            .partner()
            .map(|partner| self.arena.person(partner).clone()))
    }
}
