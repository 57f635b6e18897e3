//! Output formatting utilities

use kinship_core::{generation_prefix, Person, PersonDetails, QueryKind, Relative};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Serialize any result as pretty JSON
pub fn format_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// What a query result is called in a heading, e.g. "great grandparents"
fn noun(kind: QueryKind, generations: u32) -> String {
    match kind {
        QueryKind::Parents => "parents".to_string(),
        QueryKind::Children => "children".to_string(),
        QueryKind::Siblings => "siblings".to_string(),
        QueryKind::Grandparents => "grandparents".to_string(),
        QueryKind::Grandchildren => "grandchildren".to_string(),
        QueryKind::Cousins => "cousins".to_string(),
        QueryKind::Ancestors => {
            format!("{}parents", generation_prefix(generations).to_lowercase())
        }
        QueryKind::Descendants => {
            format!("{}children", generation_prefix(generations).to_lowercase())
        }
        QueryKind::PaternalLineage => "paternal lineage".to_string(),
        QueryKind::MaternalLineage => "maternal lineage".to_string(),
    }
}

/// Render a query result as text lines
pub fn render_relatives(
    subject: &Person,
    kind: QueryKind,
    generations: u32,
    relatives: &[Relative],
) -> String {
    let noun = noun(kind, generations);
    if relatives.is_empty() {
        return format!("{} has no {} on record.\n", subject.name(), noun);
    }

    let qualifier = if subject.is_adopted() { "adoptive " } else { "" };
    let mut out = format!("{}'s {}{}:\n", subject.name(), qualifier, noun);
    for relative in relatives {
        out.push_str(&format!("{}: {}\n", relative.title(), relative.person));
    }
    out
}

/// Render the full details of one person
pub fn render_details(details: &PersonDetails) -> String {
    let person = &details.person;
    let mut out = format!("{}\n", person);

    if person.is_adopted() {
        out.push_str(&format!("{} is adopted.\n", person.name()));
    }
    if let Some(partner) = &details.partner {
        out.push_str(&format!("{} is currently married to {}\n", person.name(), partner));
    }
    if person.is_divorced() {
        out.push_str(&format!("{} has had a divorce in the past.\n", person.name()));
    }

    out.push_str(&render_relatives(person, QueryKind::Parents, 1, &details.parents));
    out.push_str(&render_relatives(person, QueryKind::Siblings, 1, &details.siblings));
    out.push_str(&render_relatives(person, QueryKind::Children, 1, &details.children));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_core::Role;

    #[test]
    fn test_render_relatives() {
        let carol = Person::new("Carol", "2005-05-05", "Leeds");
        let dan = Person::new("Dan", "2007-07-07", "Leeds");

        let text = render_relatives(
            &carol,
            QueryKind::Siblings,
            1,
            &[Relative::new(Role::FullSibling, 1, dan)],
        );
        assert_eq!(
            text,
            "Carol's siblings:\nSibling: Name: Dan, Date of Birth: 2007-07-07, Birth Place: Leeds\n"
        );
    }

    #[test]
    fn test_render_empty_and_generational_headings() {
        let carol = Person::new("Carol", "2005-05-05", "Leeds");
        assert_eq!(
            render_relatives(&carol, QueryKind::Ancestors, 3, &[]),
            "Carol has no great grandparents on record.\n"
        );
        assert_eq!(
            render_relatives(&carol, QueryKind::Descendants, 1, &[]),
            "Carol has no children on record.\n"
        );
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::from("anything"), OutputFormat::Table);
    }
}
