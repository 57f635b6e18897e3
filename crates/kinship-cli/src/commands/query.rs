//! Relationship query command

use clap::{Args, ValueEnum};
use kinship_core::limits::generations_from_signed;
use kinship_core::{Error, PersonKey, QueryKind, RelativeQuery};

use crate::output::{format_json, render_relatives, OutputFormat};
use crate::AppContext;

#[derive(Args)]
pub struct QueryArgs {
    /// What to look up
    pub kind: QueryKindArg,
    /// Person's name
    pub name: String,
    /// Person's date of birth
    pub dob: String,
    /// Generations for ancestors/descendants (1 = parents/children)
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub generations: i64,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum QueryKindArg {
    Parents,
    Children,
    Siblings,
    Grandparents,
    Grandchildren,
    Cousins,
    Ancestors,
    Descendants,
    Paternal,
    Maternal,
}

impl From<QueryKindArg> for QueryKind {
    fn from(k: QueryKindArg) -> Self {
        match k {
            QueryKindArg::Parents => QueryKind::Parents,
            QueryKindArg::Children => QueryKind::Children,
            QueryKindArg::Siblings => QueryKind::Siblings,
            QueryKindArg::Grandparents => QueryKind::Grandparents,
            QueryKindArg::Grandchildren => QueryKind::Grandchildren,
            QueryKindArg::Cousins => QueryKind::Cousins,
            QueryKindArg::Ancestors => QueryKind::Ancestors,
            QueryKindArg::Descendants => QueryKind::Descendants,
            QueryKindArg::Paternal => QueryKind::PaternalLineage,
            QueryKindArg::Maternal => QueryKind::MaternalLineage,
        }
    }
}

pub fn run(args: &QueryArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let kind = QueryKind::from(args.kind);
    let key = PersonKey::new(&args.name, &args.dob);

    let mut query = RelativeQuery::new(kind, key.clone());
    if kind.takes_generations() {
        let generations =
            generations_from_signed(args.generations).map_err(Error::InvalidArgument)?;
        query = query.with_generations(generations);
    }

    let relatives = match ctx.tree.execute(&query) {
        Ok(relatives) => relatives,
        Err(Error::NotFound(missing)) => {
            println!("{} isn't in the tree.", missing);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!("Query {} for {} returned {} records", kind, key, relatives.len());

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&relatives)),
        OutputFormat::Table => {
            let subject = ctx.tree.person(&key)?;
            print!(
                "{}",
                render_relatives(&subject, kind, query.generations.unwrap_or(1), &relatives)
            );
        }
    }
    Ok(())
}
