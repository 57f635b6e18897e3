//! Load command

use clap::Args;

use crate::output::{format_json, OutputFormat};
use crate::AppContext;

#[derive(Args)]
pub struct LoadArgs {
    /// List everyone in the tree after loading
    #[arg(short, long)]
    pub list: bool,
}

pub fn run(args: &LoadArgs, ctx: &mut AppContext) -> anyhow::Result<()> {
    let Some(report) = ctx.load_data()? else {
        anyhow::bail!("No data directory given. Use --data-dir or set data_dir in the config file.");
    };

    match ctx.format {
        OutputFormat::Json => {
            let people: Vec<_> = if args.list {
                ctx.tree.people().collect()
            } else {
                Vec::new()
            };
            let body = serde_json::json!({ "report": report, "people": people });
            println!("{}", format_json(&body));
        }
        OutputFormat::Table => {
            println!("{}", report);
            if args.list {
                println!("People in tree ({}):", ctx.tree.len());
                for person in ctx.tree.people() {
                    println!("  {}", person);
                }
            }
        }
    }

    Ok(())
}
