//! Person record and identity key

use serde::{Deserialize, Serialize};

/// Identity of a person: name plus date of birth
///
/// Two records with the same key describe the same individual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonKey {
    pub name: String,
    pub date_of_birth: String,
}

impl PersonKey {
    pub fn new(name: impl Into<String>, date_of_birth: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date_of_birth: date_of_birth.into(),
        }
    }
}

impl std::fmt::Display for PersonKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.date_of_birth)
    }
}

impl<N: Into<String>, D: Into<String>> From<(N, D)> for PersonKey {
    fn from((name, date_of_birth): (N, D)) -> Self {
        Self::new(name, date_of_birth)
    }
}

/// An individual in the family tree
///
/// Identity fields are fixed at construction. The role flags mirror the
/// graph topology and are only changed by `FamilyTree` mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    #[serde(flatten)]
    key: PersonKey,

    /// Place of birth (free text, may be empty)
    birthplace: String,

    #[serde(default)]
    is_mother: bool,
    #[serde(default)]
    is_father: bool,
    #[serde(default)]
    is_married: bool,
    #[serde(default)]
    is_divorced: bool,
    #[serde(default)]
    is_adopted: bool,
}

impl Person {
    /// Create a new person with all role flags cleared
    pub fn new(
        name: impl Into<String>,
        date_of_birth: impl Into<String>,
        birthplace: impl Into<String>,
    ) -> Self {
        Self {
            key: PersonKey::new(name, date_of_birth),
            birthplace: birthplace.into(),
            is_mother: false,
            is_father: false,
            is_married: false,
            is_divorced: false,
            is_adopted: false,
        }
    }

    pub fn key(&self) -> &PersonKey {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn date_of_birth(&self) -> &str {
        &self.key.date_of_birth
    }

    pub fn birthplace(&self) -> &str {
        &self.birthplace
    }

    pub fn is_mother(&self) -> bool {
        self.is_mother
    }

    pub fn is_father(&self) -> bool {
        self.is_father
    }

    pub fn is_married(&self) -> bool {
        self.is_married
    }

    pub fn is_divorced(&self) -> bool {
        self.is_divorced
    }

    pub fn is_adopted(&self) -> bool {
        self.is_adopted
    }

    pub(crate) fn mark_mother(&mut self) {
        self.is_mother = true;
    }

    pub(crate) fn mark_father(&mut self) {
        self.is_father = true;
    }

    pub(crate) fn mark_married(&mut self) {
        self.is_married = true;
    }

    pub(crate) fn mark_divorced(&mut self) {
        self.is_married = false;
        self.is_divorced = true;
    }

    pub(crate) fn mark_adopted(&mut self) {
        self.is_adopted = true;
    }
}

/// Equality is identity: name and date of birth. Birthplace and flags are ignored.
impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Person {}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Name: {}, Date of Birth: {}, Birth Place: {}",
            self.name(),
            self.date_of_birth(),
            self.birthplace
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_creation() {
        let person = Person::new("Alice", "1980-01-01", "Leeds");

        assert_eq!(person.name(), "Alice");
        assert_eq!(person.date_of_birth(), "1980-01-01");
        assert_eq!(person.birthplace(), "Leeds");
        assert!(!person.is_mother());
        assert!(!person.is_father());
        assert!(!person.is_married());
        assert!(!person.is_divorced());
        assert!(!person.is_adopted());
    }

    #[test]
    fn test_equality_ignores_birthplace_and_flags() {
        let a = Person::new("Alice", "1980-01-01", "Leeds");
        let mut b = Person::new("Alice", "1980-01-01", "York");
        b.mark_mother();

        assert_eq!(a, b);
        assert_ne!(a, Person::new("Alice", "1981-01-01", "Leeds"));
    }

    #[test]
    fn test_divorce_clears_married() {
        let mut person = Person::new("Bob", "1978-03-02", "Hull");
        person.mark_married();
        person.mark_divorced();

        assert!(!person.is_married());
        assert!(person.is_divorced());
    }

    #[test]
    fn test_key_display() {
        let key = PersonKey::from(("Carol", "2005-06-07"));
        assert_eq!(key.to_string(), "Carol (2005-06-07)");
    }
}
