//! Interactive console
//!
//! One command per line. Fields are separated by `|` so names and places
//! may contain spaces:
//!
//! ```text
//! add Alice|1980-01-01|Leeds
//! mother Carol|2005-05-05|Alice|1980-01-01
//! query siblings Carol|2005-05-05
//! query ancestors Carol|2005-05-05|3
//! ```

use std::io::{BufRead, Write};

use kinship_core::limits::generations_from_signed;
use kinship_core::{Error, FamilyTree, Person, PersonKey, QueryKind, RelativeQuery};

use crate::output::{format_json, render_details, render_relatives, OutputFormat};

const HELP: &str = "\
Commands (fields separated by '|'):
  add NAME|DOB|PLACE              add a person
  mother NAME|DOB|MOTHER|DOB      link a person to their mother
  father NAME|DOB|FATHER|DOB      link a person to their father
  wed NAME|DOB|NAME|DOB           record a wedding
  divorce NAME|DOB|NAME|DOB       record a divorce
  adopt NAME|DOB                  record an adoption
  show NAME|DOB                   details of one person
  query KIND NAME|DOB[|N]         parents, children, siblings, grandparents,
                                  grandchildren, cousins, ancestors,
                                  descendants, paternal, maternal
  list                            everyone in the tree
  help                            this text
  quit                            leave the console
";

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(Person),
    Mother { child: PersonKey, mother: PersonKey },
    Father { child: PersonKey, father: PersonKey },
    Wed(PersonKey, PersonKey),
    Divorce(PersonKey, PersonKey),
    Adopt(PersonKey),
    Show(PersonKey),
    Query(RelativeQuery),
    List,
    Help,
    Quit,
}

fn fields(rest: &str) -> Vec<&str> {
    rest.split('|').map(str::trim).collect()
}

fn one_key(rest: &str) -> Result<PersonKey, String> {
    match fields(rest).as_slice() {
        [name, dob] => Ok(PersonKey::new(*name, *dob)),
        _ => Err("expected NAME|DOB".to_string()),
    }
}

fn two_keys(rest: &str) -> Result<(PersonKey, PersonKey), String> {
    match fields(rest).as_slice() {
        [n1, d1, n2, d2] => Ok((PersonKey::new(*n1, *d1), PersonKey::new(*n2, *d2))),
        _ => Err("expected NAME|DOB|NAME|DOB".to_string()),
    }
}

/// Parse one console line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb.to_lowercase().as_str() {
        "add" => match fields(rest).as_slice() {
            [name, dob, place] => ShellCommand::Add(Person::new(*name, *dob, *place)),
            _ => return Err("expected NAME|DOB|PLACE".to_string()),
        },
        "mother" => {
            let (child, mother) = two_keys(rest)?;
            ShellCommand::Mother { child, mother }
        }
        "father" => {
            let (child, father) = two_keys(rest)?;
            ShellCommand::Father { child, father }
        }
        "wed" => {
            let (a, b) = two_keys(rest)?;
            ShellCommand::Wed(a, b)
        }
        "divorce" => {
            let (a, b) = two_keys(rest)?;
            ShellCommand::Divorce(a, b)
        }
        "adopt" => ShellCommand::Adopt(one_key(rest)?),
        "show" => ShellCommand::Show(one_key(rest)?),
        "query" => {
            let (kind, subject) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "expected KIND NAME|DOB".to_string())?;
            let kind: QueryKind = kind.parse()?;
            match fields(subject).as_slice() {
                [name, dob] => ShellCommand::Query(RelativeQuery::new(kind, (*name, *dob))),
                [name, dob, generations] => {
                    let generations: i64 = generations
                        .parse()
                        .map_err(|_| format!("invalid generation count: {}", generations))?;
                    let generations = generations_from_signed(generations)
                        .map_err(|reason| Error::InvalidArgument(reason).to_string())?;
                    ShellCommand::Query(
                        RelativeQuery::new(kind, (*name, *dob)).with_generations(generations),
                    )
                }
                _ => return Err("expected KIND NAME|DOB[|N]".to_string()),
            }
        }
        "list" => ShellCommand::List,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "x" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {}", other)),
    };

    Ok(Some(command))
}

/// Apply one command and return the text to show
pub fn execute(tree: &mut FamilyTree, command: &ShellCommand, format: OutputFormat) -> String {
    let result = match command {
        ShellCommand::Add(person) => tree
            .add_person(person.clone())
            .map(|()| format!("{} added.\n", person)),
        ShellCommand::Mother { child, mother } => tree
            .link_mother(child, mother)
            .map(|()| format!("{} is now the mother of {}.\n", mother, child)),
        ShellCommand::Father { child, father } => tree
            .link_father(child, father)
            .map(|()| format!("{} is now the father of {}.\n", father, child)),
        ShellCommand::Wed(a, b) => tree
            .record_wedding(a, b)
            .map(|()| format!("Wedding of {} and {} recorded.\n", a, b)),
        ShellCommand::Divorce(a, b) => tree
            .record_divorce(a, b)
            .map(|()| format!("Divorce of {} and {} recorded.\n", a, b)),
        ShellCommand::Adopt(key) => tree
            .record_adoption(key)
            .map(|()| format!("Adoption of {} recorded.\n", key)),
        ShellCommand::Show(key) => tree.details(key).map(|details| match format {
            OutputFormat::Json => format!("{}\n", format_json(&details)),
            OutputFormat::Table => render_details(&details),
        }),
        ShellCommand::Query(query) => tree.execute(query).and_then(|relatives| {
            Ok(match format {
                OutputFormat::Json => format!("{}\n", format_json(&relatives)),
                OutputFormat::Table => render_relatives(
                    &tree.person(&query.subject)?,
                    query.kind,
                    query.generations.unwrap_or(1),
                    &relatives,
                ),
            })
        }),
        ShellCommand::List => Ok(tree
            .people()
            .map(|person| format!("{}\n", person))
            .collect::<String>()),
        ShellCommand::Help => Ok(HELP.to_string()),
        ShellCommand::Quit => Ok(String::new()),
    };

    result.unwrap_or_else(|e| format!("error: {}\n", e))
}

/// Read commands from `input` until EOF or `quit`
pub fn run<R: BufRead, W: Write>(
    tree: &mut FamilyTree,
    input: R,
    mut output: W,
    format: OutputFormat,
) -> anyhow::Result<()> {
    writeln!(output, "Kinship console. Type 'help' for commands.")?;
    write!(output, "kinship> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(command)) => {
                tracing::debug!("Console command: {:?}", command);
                write!(output, "{}", execute(tree, &command, format))?;
            }
            Ok(None) => {}
            Err(message) => writeln!(output, "error: {}", message)?,
        }
        write!(output, "kinship> ")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}
