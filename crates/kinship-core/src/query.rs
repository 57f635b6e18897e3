//! Query result records
//!
//! Queries return structured `(role, person)` records. Turning them into
//! sentences is left to the caller; [`Relative::title`] gives the short
//! label ("Great grandmother", "Adopted cousin") a renderer usually wants.

use crate::person::{Person, PersonKey};
use serde::{Deserialize, Serialize};

/// Family role of a related person, as seen from the query subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Mother,
    Father,
    Stepparent,
    Child,
    AdoptedChild,
    Stepchild,
    FullSibling,
    HalfSibling,
    StepSibling,
    Cousin,
}

impl Role {
    /// Role of an ancestor, taken from their parent flag
    pub fn of_parent(person: &Person) -> Self {
        if person.is_mother() {
            Self::Mother
        } else {
            Self::Father
        }
    }

    /// Role of a descendant, taken from their adoption flag
    pub fn of_child(person: &Person) -> Self {
        if person.is_adopted() {
            Self::AdoptedChild
        } else {
            Self::Child
        }
    }

    fn base(self) -> &'static str {
        match self {
            Self::Mother => "mother",
            Self::Father => "father",
            Self::Stepparent => "stepparent",
            Self::Child | Self::AdoptedChild => "child",
            Self::Stepchild => "stepchild",
            Self::FullSibling => "sibling",
            Self::HalfSibling => "half sibling",
            Self::StepSibling => "step sibling",
            Self::Cousin => "cousin",
        }
    }

    fn is_generational(self) -> bool {
        matches!(
            self,
            Self::Mother | Self::Father | Self::Child | Self::AdoptedChild
        )
    }
}

/// One related person in a query result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relative {
    pub role: Role,

    /// Generations between subject and relative (1 = parent/child, 2 = grand, ...)
    pub generation: u32,

    /// Snapshot of the related person at query time
    pub person: Person,
}

impl Relative {
    pub fn new(role: Role, generation: u32, person: Person) -> Self {
        Self {
            role,
            generation,
            person,
        }
    }

    /// Short human label, e.g. "Grandfather" or "Adopted half sibling"
    pub fn title(&self) -> String {
        let mut label = if self.role.is_generational() {
            format!("{}{}", generation_prefix(self.generation), self.role.base())
        } else {
            self.role.base().to_string()
        };

        let adopted = match self.role {
            Role::AdoptedChild => true,
            Role::FullSibling | Role::HalfSibling | Role::StepSibling | Role::Cousin => {
                self.person.is_adopted()
            }
            _ => false,
        };
        if adopted {
            label = format!("adopted {}", label.to_lowercase());
        }

        capitalize(&label)
    }
}

/// Generation modifier for a distance: "" (1), "Grand" (2), "Great grand" (3),
/// "Great great grand" (4), ...
pub fn generation_prefix(generation: u32) -> String {
    match generation {
        0 | 1 => String::new(),
        2 => "Grand".to_string(),
        n => {
            let greats = vec!["great"; (n - 2) as usize].join(" ");
            capitalize(&format!("{} grand", greats))
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Kind of relationship query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Parents,
    Children,
    Siblings,
    Grandparents,
    Grandchildren,
    Cousins,
    Ancestors,
    Descendants,
    PaternalLineage,
    MaternalLineage,
}

impl QueryKind {
    pub const ALL: [QueryKind; 10] = [
        Self::Parents,
        Self::Children,
        Self::Siblings,
        Self::Grandparents,
        Self::Grandchildren,
        Self::Cousins,
        Self::Ancestors,
        Self::Descendants,
        Self::PaternalLineage,
        Self::MaternalLineage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parents => "parents",
            Self::Children => "children",
            Self::Siblings => "siblings",
            Self::Grandparents => "grandparents",
            Self::Grandchildren => "grandchildren",
            Self::Cousins => "cousins",
            Self::Ancestors => "ancestors",
            Self::Descendants => "descendants",
            Self::PaternalLineage => "paternal",
            Self::MaternalLineage => "maternal",
        }
    }

    /// True for queries that take a generation count
    pub fn takes_generations(self) -> bool {
        matches!(self, Self::Ancestors | Self::Descendants)
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for QueryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let wanted = match wanted.as_str() {
            "paternal_lineage" | "paternal-lineage" => "paternal",
            "maternal_lineage" | "maternal-lineage" => "maternal",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("unknown query kind: {}", s))
    }
}

/// A relationship query described as data, run with `FamilyTree::execute`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeQuery {
    pub kind: QueryKind,
    pub subject: PersonKey,

    /// Generation count for ancestors/descendants (defaults to 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generations: Option<u32>,
}

impl RelativeQuery {
    pub fn new(kind: QueryKind, subject: impl Into<PersonKey>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            generations: None,
        }
    }

    pub fn with_generations(mut self, generations: u32) -> Self {
        self.generations = Some(generations);
        self
    }
}

/// Everything known about one person, gathered in a single query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonDetails {
    pub person: Person,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<Person>,
    pub parents: Vec<Relative>,
    pub siblings: Vec<Relative>,
    pub children: Vec<Relative>,
}
