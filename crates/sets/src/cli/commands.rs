//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Reads and writes the vault snapshot
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap turns shell arguments into [`Commands`]
//! 2. **Context Setup**: load configuration and the vault, build the API
//! 3. **Dispatch**: route each command to the API facade
//! 4. **Persistence**: write the snapshot back after a command changed it
//! 5. **Output Formatting**: hand the result to `render`

use super::logging;
use super::render::render;
use super::setup::{Cli, Commands};
use anyhow::{bail, Context};
use clap::Parser;
use setsapp::api::{parse_clauses, SetsApi};
use setsapp::commands::{CmdResult, MessageLevel};
use setsapp::config::{SetsConfig, CONFIG_FILE};
use setsapp::query::{Clause, Operator};
use setsapp::store::memory::InMemoryVault;
use std::path::{Path, PathBuf};
use tracing::debug;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = load_config(&cli)?;
    let vault = InMemoryVault::load_snapshot(&cli.vault)
        .with_context(|| format!("cannot load vault {}", cli.vault.display()))?
        .with_properties(config.properties());
    let mut api = SetsApi::new(vault, config);

    let (result, changed) = dispatch(&mut api, cli.command)?;
    if changed {
        api.store()
            .save_snapshot(&cli.vault)
            .with_context(|| format!("cannot save vault {}", cli.vault.display()))?;
    }

    print!("{}", render(&result, cli.output)?);
    Ok(())
}

/// `--config` when given (it must exist), else `sets.toml` next to the vault.
fn project_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(path) = &cli.config {
        if !path.exists() {
            bail!("config file {} does not exist", path.display());
        }
        return Ok(path.clone());
    }
    let dir = cli.vault.parent().unwrap_or(Path::new("."));
    Ok(dir.join(CONFIG_FILE))
}

fn load_config(cli: &Cli) -> anyhow::Result<SetsConfig> {
    let path = project_config_path(cli)?;
    debug!(path = %path.display(), "loading config");
    SetsConfig::load(Some(&path)).context("cannot load configuration")
}

/// Run one command. The flag is true when the vault was modified.
fn dispatch(
    api: &mut SetsApi<InMemoryVault>,
    command: Commands,
) -> anyhow::Result<(CmdResult, bool)> {
    let outcome = match command {
        Commands::Query {
            clauses,
            sort,
            context,
        } => (api.select(&clauses[..], &sort[..], context.as_deref())?, false),
        Commands::Types => (api.types()?, false),
        Commands::Collections => (api.collections()?, false),
        Commands::Members { collection } => (api.members(&collection)?, false),
        Commands::Available { doc } => (api.available_collections(&doc)?, false),
        Commands::Add { doc, collection } => {
            let result = api.add_to_collection(&doc, &collection)?;
            let changed = result
                .messages
                .iter()
                .any(|m| matches!(m.level, MessageLevel::Success));
            (result, changed)
        }
        Commands::New {
            name,
            type_name,
            collection,
            clauses,
        } => {
            let config = api.config().clone();
            let mut clauses = parse_clauses(&clauses[..])?;
            if let Some(type_name) = type_name {
                clauses.push(Clause::eq(config.type_attribute.as_str(), type_name));
            }
            if collection.is_some() {
                clauses.push(Clause::link_to_this(
                    config.collection_attribute.as_str(),
                    Operator::HasThis,
                ));
            }
            (api.create(clauses, collection.as_deref(), &name)?, true)
        }
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use setsapp::attributes::AttrValue;
    use setsapp::model::Document;
    use setsapp::store::VaultDb;

    fn api() -> SetsApi<InMemoryVault> {
        let vault = InMemoryVault::from_documents([
            Document::new("Favorites.md").with_attr("type", "collection"),
            Document::new("books/Dune.md").with_attr("type", "book"),
        ]);
        SetsApi::new(vault, SetsConfig::default())
    }

    #[test]
    fn reads_do_not_mark_vault_changed() {
        let mut api = api();
        let (result, changed) = dispatch(
            &mut api,
            Commands::Query {
                clauses: vec!["type:eq:book".to_string()],
                sort: vec![],
                context: None,
            },
        )
        .unwrap();
        assert!(!changed);
        assert_eq!(result.listed_names(), vec!["Dune"]);
    }

    #[test]
    fn add_marks_vault_changed_once() {
        let mut api = api();
        let add = || Commands::Add {
            doc: "books/Dune.md".to_string(),
            collection: "Favorites.md".to_string(),
        };
        let (_, changed) = dispatch(&mut api, add()).unwrap();
        assert!(changed);
        let (_, changed) = dispatch(&mut api, add()).unwrap();
        assert!(!changed);
    }

    #[test]
    fn new_combines_type_collection_and_clauses() {
        let mut api = api();
        let (_, changed) = dispatch(
            &mut api,
            Commands::New {
                name: "Emma".to_string(),
                type_name: Some("book".to_string()),
                collection: Some("Favorites.md".to_string()),
                clauses: vec!["status:eq:todo".to_string()],
            },
        )
        .unwrap();
        assert!(changed);

        let doc = api.store().document("Emma.md").unwrap();
        assert_eq!(doc.get("type"), Some(&AttrValue::from("book")));
        assert_eq!(doc.get("status"), Some(&AttrValue::from("todo")));
        assert_eq!(
            doc.get("collection"),
            Some(&AttrValue::list(["[[Favorites]]"]))
        );
    }
}
