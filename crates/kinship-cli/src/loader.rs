//! Bulk loader for whitespace-delimited record files
//!
//! Three files seed a tree:
//! - people:  `name dob place...`
//! - fathers: `child childDob father fatherDob`
//! - mothers: `child childDob mother motherDob`
//!
//! Records are replayed through the normal `FamilyTree` mutations. Bad lines
//! and rejected records are logged and counted, never fatal.

use std::path::{Path, PathBuf};

use anyhow::Context;
use kinship_core::{FamilyTree, ParentRole, Person, PersonKey};
use serde::Serialize;

use crate::config::Config;

/// Paths of the three record files
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub people: PathBuf,
    pub fathers: PathBuf,
    pub mothers: PathBuf,
}

impl DataFiles {
    pub fn in_dir(dir: &Path, config: &Config) -> Self {
        Self {
            people: dir.join(&config.person_file),
            fathers: dir.join(&config.fathers_file),
            mothers: dir.join(&config.mothers_file),
        }
    }
}

/// Counts of what a load did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub people_added: usize,
    pub people_rejected: usize,
    pub fathers_linked: usize,
    pub mothers_linked: usize,
    pub links_rejected: usize,
    pub lines_skipped: usize,
}

impl std::fmt::Display for LoadReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "People: {} added, {} rejected",
            self.people_added, self.people_rejected
        )?;
        writeln!(
            f,
            "Links: {} fathers, {} mothers, {} rejected",
            self.fathers_linked, self.mothers_linked, self.links_rejected
        )?;
        write!(f, "Skipped lines: {}", self.lines_skipped)
    }
}

fn is_ignorable(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}

/// Parse `name dob place...`. The place may contain spaces.
pub fn parse_person_line(line: &str) -> Option<Person> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next()?;
    let dob = tokens.next()?;
    let place: Vec<&str> = tokens.collect();
    if place.is_empty() {
        return None;
    }
    Some(Person::new(name, dob, place.join(" ")))
}

/// Parse `child childDob parent parentDob`
pub fn parse_link_line(line: &str) -> Option<(PersonKey, PersonKey)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [child, child_dob, parent, parent_dob] => Some((
            PersonKey::new(*child, *child_dob),
            PersonKey::new(*parent, *parent_dob),
        )),
        _ => None,
    }
}

/// Replay person records into the tree
pub fn replay_people(tree: &mut FamilyTree, content: &str, report: &mut LoadReport) {
    for (number, line) in content.lines().enumerate() {
        if is_ignorable(line) {
            continue;
        }
        let Some(person) = parse_person_line(line) else {
            tracing::warn!("Skipping malformed person record on line {}: {:?}", number + 1, line);
            report.lines_skipped += 1;
            continue;
        };
        match tree.add_person(person) {
            Ok(()) => report.people_added += 1,
            Err(e) => {
                tracing::warn!("Person on line {} rejected: {}", number + 1, e);
                report.people_rejected += 1;
            }
        }
    }
}

/// Replay parent link records into the tree
pub fn replay_links(
    tree: &mut FamilyTree,
    content: &str,
    role: ParentRole,
    report: &mut LoadReport,
) {
    for (number, line) in content.lines().enumerate() {
        if is_ignorable(line) {
            continue;
        }
        let Some((child, parent)) = parse_link_line(line) else {
            tracing::warn!("Skipping malformed link record on line {}: {:?}", number + 1, line);
            report.lines_skipped += 1;
            continue;
        };
        let result = match role {
            ParentRole::Father => tree.link_father(&child, &parent),
            ParentRole::Mother => tree.link_mother(&child, &parent),
        };
        match (result, role) {
            (Ok(()), ParentRole::Father) => report.fathers_linked += 1,
            (Ok(()), ParentRole::Mother) => report.mothers_linked += 1,
            (Err(e), _) => {
                tracing::warn!("Link on line {} rejected: {}", number + 1, e);
                report.links_rejected += 1;
            }
        }
    }
}

/// Load all three files. The people file is required; a missing link file
/// is logged and treated as empty.
pub fn load_files(tree: &mut FamilyTree, files: &DataFiles) -> anyhow::Result<LoadReport> {
    tracing::info!("Loading people from {:?}", files.people);
    let mut report = LoadReport::default();

    let people = std::fs::read_to_string(&files.people)
        .with_context(|| format!("Failed to read {}", files.people.display()))?;
    replay_people(tree, &people, &mut report);

    for (path, role) in [
        (&files.fathers, ParentRole::Father),
        (&files.mothers, ParentRole::Mother),
    ] {
        if !path.exists() {
            tracing::warn!("Link file {:?} not found, skipping", path);
            continue;
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        replay_links(tree, &content, role, &mut report);
    }

    tracing::info!(
        "Loaded {} people, {} links",
        report.people_added,
        report.fathers_linked + report.mothers_linked
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_person_line() {
        let person = parse_person_line("Alice 1980-01-01 Leeds").unwrap();
        assert_eq!(person.name(), "Alice");
        assert_eq!(person.date_of_birth(), "1980-01-01");
        assert_eq!(person.birthplace(), "Leeds");

        let person = parse_person_line("Bob 1979-02-02  Kingston upon Hull").unwrap();
        assert_eq!(person.birthplace(), "Kingston upon Hull");

        assert!(parse_person_line("Alice 1980-01-01").is_none());
    }

    #[test]
    fn test_parse_link_line() {
        let (child, parent) = parse_link_line("Carol 2005-05-05 Bob 1979-02-02").unwrap();
        assert_eq!(child, PersonKey::new("Carol", "2005-05-05"));
        assert_eq!(parent, PersonKey::new("Bob", "1979-02-02"));

        assert!(parse_link_line("Carol 2005-05-05 Bob").is_none());
        assert!(parse_link_line("a b c d e").is_none());
    }

    #[test]
    fn test_replay_counts_outcomes() {
        let mut tree = FamilyTree::new();
        let mut report = LoadReport::default();

        replay_people(
            &mut tree,
            "# people\nAlice 1980-01-01 Leeds\nBob 1979-02-02 Hull\n\nAlice 1980-01-01 York\nbroken\n",
            &mut report,
        );
        replay_people(&mut tree, "Carol 2005-05-05 Leeds\n", &mut report);
        replay_links(
            &mut tree,
            "Carol 2005-05-05 Bob 1979-02-02\nCarol 2005-05-05 Ghost 1900-01-01\n",
            ParentRole::Father,
            &mut report,
        );
        replay_links(
            &mut tree,
            "Carol 2005-05-05 Alice 1980-01-01\n",
            ParentRole::Mother,
            &mut report,
        );

        assert_eq!(
            report,
            LoadReport {
                people_added: 3,
                people_rejected: 1,
                fathers_linked: 1,
                mothers_linked: 1,
                links_rejected: 1,
                lines_skipped: 1,
            }
        );
        assert!(tree.has_father(&PersonKey::new("Carol", "2005-05-05")).unwrap());
        assert!(tree.has_mother(&PersonKey::new("Carol", "2005-05-05")).unwrap());
    }
}
