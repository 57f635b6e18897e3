//! Show command

use clap::Args;
use kinship_core::{Error, PersonKey};

use crate::output::{format_json, render_details, OutputFormat};
use crate::AppContext;

#[derive(Args)]
pub struct ShowArgs {
    /// Person's name
    pub name: String,
    /// Person's date of birth
    pub dob: String,
}

pub fn run(args: &ShowArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let key = PersonKey::new(&args.name, &args.dob);
    tracing::debug!("Showing details for {}", key);

    let details = match ctx.tree.details(&key) {
        Ok(details) => details,
        Err(Error::NotFound(_)) => {
            println!("{} isn't in the tree.", key);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&details)),
        OutputFormat::Table => print!("{}", render_details(&details)),
    }
    Ok(())
}
