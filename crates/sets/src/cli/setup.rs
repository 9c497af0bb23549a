use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(
    name = "sets",
    bin_name = "sets",
    version,
    disable_help_subcommand = true,
    after_help = "Clauses are written key:op[:value], e.g. status:eq:done or tags:hasall:[\"a\",\"b\"].\nOperators: eq neq isempty notempty contains nocontains hasall hasthis gt gte lt lte.\nThe value @link-to-this stands for a link to the --context document."
)]
#[command(about = "Select, group and create documents in a frontmatter vault", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault snapshot (JSON array of documents)
    #[arg(long, global = true, env = "SETS_VAULT", default_value = "vault.json", help_heading = "Options")]
    pub vault: PathBuf,

    /// Config file (defaults to sets.toml next to the vault)
    #[arg(long, global = true, help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t, help_heading = "Options")]
    pub output: OutputFormat,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List documents matching every clause
    #[command(alias = "q", display_order = 1)]
    Query {
        /// Clauses, key:op[:value]
        clauses: Vec<String>,

        /// Sort field, key[:asc|desc]; repeat for tie-breakers
        #[arg(short, long)]
        sort: Vec<String>,

        /// Path of the context document for @link-to-this and hasthis
        #[arg(short, long)]
        context: Option<String>,
    },

    /// List distinct document types
    #[command(display_order = 2)]
    Types,

    /// List collections
    #[command(alias = "ls", display_order = 3)]
    Collections,

    /// List the members of a collection
    #[command(display_order = 4)]
    Members {
        /// Path of the collection document
        collection: String,
    },

    /// List collections a document can be added to
    #[command(display_order = 5)]
    Available {
        /// Path of the document
        doc: String,
    },

    /// Add a document to a collection
    #[command(display_order = 6)]
    Add {
        /// Path of the document
        doc: String,

        /// Path of the collection document
        collection: String,
    },

    /// Create a document that satisfies the given clauses
    #[command(alias = "n", display_order = 7)]
    New {
        /// Name of the new document (without .md)
        name: String,

        /// Document type
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,

        /// Path of a collection to create the document in
        #[arg(short = 'i', long = "in")]
        collection: Option<String>,

        /// Extra clauses to satisfy, key:op[:value]
        #[arg(short = 'w', long = "where")]
        clauses: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_query_with_sort_and_context() {
        let cli = Cli::try_parse_from([
            "sets",
            "query",
            "type:eq:book",
            "status:neq:done",
            "-s",
            "priority:desc",
            "--context",
            "Reading List.md",
            "--output",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Query {
                clauses,
                sort,
                context,
            } => {
                assert_eq!(clauses, vec!["type:eq:book", "status:neq:done"]);
                assert_eq!(sort, vec!["priority:desc"]);
                assert_eq!(context.as_deref(), Some("Reading List.md"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn parses_new_with_type_and_collection() {
        let cli = Cli::try_parse_from([
            "sets", "new", "Foundation", "--type", "book", "--in", "Favorites.md", "-w",
            "status:eq:todo", "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::New {
                name,
                type_name,
                collection,
                clauses,
            } => {
                assert_eq!(name, "Foundation");
                assert_eq!(type_name.as_deref(), Some("book"));
                assert_eq!(collection.as_deref(), Some("Favorites.md"));
                assert_eq!(clauses, vec!["status:eq:todo"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn new_short_flags_are_distinct() {
        let cli = Cli::try_parse_from([
            "sets", "new", "Emma", "-t", "book", "-i", "Reading List.md", "-w", "status:eq:todo",
            "-w", "priority:eq:1",
        ])
        .unwrap();

        match cli.command {
            Commands::New {
                type_name,
                collection,
                clauses,
                ..
            } => {
                assert_eq!(type_name.as_deref(), Some("book"));
                assert_eq!(collection.as_deref(), Some("Reading List.md"));
                assert_eq!(clauses, vec!["status:eq:todo", "priority:eq:1"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
