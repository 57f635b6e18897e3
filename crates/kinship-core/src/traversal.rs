//! Relationship queries over the family tree
//!
//! Every query resolves the subject first, so an unknown key fails with
//! `NotFound` before any traversal. Results are ordered by the order links
//! were recorded.

use crate::error::{Error, Result};
use crate::limits::validate_generations;
use crate::node::NodeId;
use crate::person::PersonKey;
use crate::query::{PersonDetails, QueryKind, Relative, RelativeQuery, Role};
use crate::tree::{FamilyTree, ParentRole};
use std::collections::HashSet;

/// Direction of a generation expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Ancestors,
    Descendants,
}

impl FamilyTree {
    fn relative(&self, role: Role, generation: u32, id: NodeId) -> Relative {
        Relative::new(role, generation, self.arena.person(id).clone())
    }

    fn parent_keys(&self, id: NodeId) -> HashSet<&PersonKey> {
        self.arena
            .get(id)
            .parents()
            .iter()
            .map(|&parent| self.key_of(parent))
            .collect()
    }

    /// Run a query described as data
    pub fn execute(&self, query: &RelativeQuery) -> Result<Vec<Relative>> {
        tracing::debug!(
            "Executing query: kind={:?}, subject={}, generations={:?}",
            query.kind,
            query.subject,
            query.generations
        );

        let subject = &query.subject;
        match query.kind {
            QueryKind::Parents => self.parents(subject),
            QueryKind::Children => self.children(subject),
            QueryKind::Siblings => self.siblings(subject),
            QueryKind::Grandparents => self.grandparents(subject),
            QueryKind::Grandchildren => self.grandchildren(subject),
            QueryKind::Cousins => self.cousins(subject),
            QueryKind::Ancestors => self.ancestors(subject, query.generations.unwrap_or(1)),
            QueryKind::Descendants => self.descendants(subject, query.generations.unwrap_or(1)),
            QueryKind::PaternalLineage => self.paternal_lineage(subject),
            QueryKind::MaternalLineage => self.maternal_lineage(subject),
        }
    }

    /// Mother and father, each followed by a stepparent when that parent's
    /// partner is not also a parent of the subject
    pub fn parents(&self, key: &PersonKey) -> Result<Vec<Relative>> {
        let id = self.resolve(key)?;
        let mut result = Vec::new();

        for &parent in self.arena.get(id).parents() {
            let person = self.arena.person(parent);
            result.push(Relative::new(Role::of_parent(person), 1, person.clone()));

            if let Some(partner) = self.arena.get(parent).partner() {
                if partner != id && !self.arena.contains_parent_link(id, partner) {
                    result.push(self.relative(Role::Stepparent, 1, partner));
                }
            }
        }

        Ok(result)
    }

    /// Children, followed by the partner's children who are not the subject's own
    pub fn children(&self, key: &PersonKey) -> Result<Vec<Relative>> {
        let id = self.resolve(key)?;
        let node = self.arena.get(id);

        let mut result: Vec<Relative> = node
            .children()
            .iter()
            .map(|&child| {
                let person = self.arena.person(child);
                Relative::new(Role::of_child(person), 1, person.clone())
            })
            .collect();

        if let Some(partner) = node.partner() {
            for &child in self.arena.get(partner).children() {
                if child != id && !self.arena.contains_child_link(id, child) {
                    result.push(self.relative(Role::Stepchild, 1, child));
                }
            }
        }

        Ok(result)
    }

    /// Full, half and step siblings, in that order
    ///
    /// A candidate reached through a shared parent is a full sibling when
    /// both parent sets are identical and a half sibling otherwise. Children
    /// reached only through a parent's partner are step siblings. Each
    /// person is reported once, under the first category that matches.
    pub fn siblings(&self, key: &PersonKey) -> Result<Vec<Relative>> {
        let id = self.resolve(key)?;
        let node = self.arena.get(id);
        let own_parents = self.parent_keys(id);

        let mut seen: HashSet<&PersonKey> = HashSet::new();
        seen.insert(self.key_of(id));

        let mut full = Vec::new();
        let mut half = Vec::new();
        let mut step = Vec::new();

        for &parent in node.parents() {
            for &candidate in self.arena.get(parent).children() {
                if !seen.insert(self.key_of(candidate)) {
                    continue;
                }
                if self.parent_keys(candidate) == own_parents {
                    full.push(self.relative(Role::FullSibling, 1, candidate));
                } else {
                    half.push(self.relative(Role::HalfSibling, 1, candidate));
                }
            }
        }

        for &parent in node.parents() {
            let Some(partner) = self.arena.get(parent).partner() else {
                continue;
            };
            for &candidate in self.arena.get(partner).children() {
                if seen.insert(self.key_of(candidate)) {
                    step.push(self.relative(Role::StepSibling, 1, candidate));
                }
            }
        }

        full.append(&mut half);
        full.append(&mut step);
        Ok(full)
    }

    /// Parents of parents, labelled by their parent flag
    pub fn grandparents(&self, key: &PersonKey) -> Result<Vec<Relative>> {
        let id = self.resolve(key)?;
        let mut result = Vec::new();

        for &parent in self.arena.get(id).parents() {
            for &grandparent in self.arena.get(parent).parents() {
                let person = self.arena.person(grandparent);
                result.push(Relative::new(Role::of_parent(person), 2, person.clone()));
            }
        }

        Ok(result)
    }

    /// Children of children, labelled by their adoption flag
    pub fn grandchildren(&self, key: &PersonKey) -> Result<Vec<Relative>> {
        let id = self.resolve(key)?;
        let mut result = Vec::new();

        for &child in self.arena.get(id).children() {
            for &grandchild in self.arena.get(child).children() {
                let person = self.arena.person(grandchild);
                result.push(Relative::new(Role::of_child(person), 2, person.clone()));
            }
        }

        Ok(result)
    }

    /// Children of every aunt and uncle, each cousin listed once
    pub fn cousins(&self, key: &PersonKey) -> Result<Vec<Relative>> {
        let id = self.resolve(key)?;
        let mut seen: HashSet<&PersonKey> = HashSet::new();
        seen.insert(self.key_of(id));
        let mut result = Vec::new();

        for &parent in self.arena.get(id).parents() {
            for &grandparent in self.arena.get(parent).parents() {
                for &aunt_or_uncle in self.arena.get(grandparent).children() {
                    if self.key_of(aunt_or_uncle) == self.key_of(parent) {
                        continue;
                    }
                    for &cousin in self.arena.get(aunt_or_uncle).children() {
                        if seen.insert(self.key_of(cousin)) {
                            result.push(self.relative(Role::Cousin, 1, cousin));
                        }
                    }
                }
            }
        }

        Ok(result)
    }

    /// Everyone exactly `generations` steps up. Converging lines are kept as
    /// duplicate entries.
    pub fn ancestors(&self, key: &PersonKey, generations: u32) -> Result<Vec<Relative>> {
        self.expand(key, generations, Axis::Ancestors)
    }

    /// Everyone exactly `generations` steps down, duplicates kept
    pub fn descendants(&self, key: &PersonKey, generations: u32) -> Result<Vec<Relative>> {
        self.expand(key, generations, Axis::Descendants)
    }

    fn expand(&self, key: &PersonKey, generations: u32, axis: Axis) -> Result<Vec<Relative>> {
        validate_generations(generations).map_err(Error::InvalidArgument)?;
        let id = self.resolve(key)?;

        // Without a cycle no path is longer than the node count
        if generations as usize >= self.arena.len() {
            tracing::debug!(
                "{:?} of {}: {} generations exceeds tree depth",
                axis,
                key,
                generations
            );
            return Ok(Vec::new());
        }

        let mut frontier = vec![id];
        for step in 0..generations {
            frontier = frontier
                .iter()
                .flat_map(|&member| {
                    let node = self.arena.get(member);
                    let links = match axis {
                        Axis::Ancestors => node.parents(),
                        Axis::Descendants => node.children(),
                    };
                    links.iter().copied()
                })
                .collect();

            if frontier.is_empty() {
                tracing::debug!("{:?} of {} exhausted after {} generations", axis, key, step + 1);
                break;
            }
        }

        Ok(frontier
            .into_iter()
            .map(|member| {
                let person = self.arena.person(member);
                let role = match axis {
                    Axis::Ancestors => Role::of_parent(person),
                    Axis::Descendants => Role::of_child(person),
                };
                Relative::new(role, generations, person.clone())
            })
            .collect())
    }

    /// Father, father's father, ... nearest first
    pub fn paternal_lineage(&self, key: &PersonKey) -> Result<Vec<Relative>> {
        self.lineage(key, ParentRole::Father)
    }

    /// Mother, mother's mother, ... nearest first
    pub fn maternal_lineage(&self, key: &PersonKey) -> Result<Vec<Relative>> {
        self.lineage(key, ParentRole::Mother)
    }

    fn lineage(&self, key: &PersonKey, role: ParentRole) -> Result<Vec<Relative>> {
        let mut current = self.resolve(key)?;
        let mut visited = HashSet::from([current]);
        let mut result = Vec::new();

        while let Some(next) = self.parent_with_role(current, role) {
            if !visited.insert(next) {
                tracing::warn!(
                    "Cycle in {:?} lineage of {} at {}; stopping",
                    role,
                    key,
                    self.key_of(next)
                );
                break;
            }
            let generation = result.len() as u32 + 1;
            let label = match role {
                ParentRole::Mother => Role::Mother,
                ParentRole::Father => Role::Father,
            };
            result.push(self.relative(label, generation, next));
            current = next;
        }

        Ok(result)
    }

    /// Person, partner, parents, siblings and children in one record
    pub fn details(&self, key: &PersonKey) -> Result<PersonDetails> {
        Ok(PersonDetails {
            person: self.person(key)?,
            partner: self.partner(key)?,
            parents: self.parents(key)?,
            siblings: self.siblings(key)?,
            children: self.children(key)?,
        })
    }
}
