//! Lingo CLI - Command-line interface for the translation memory

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lingo::config;
use lingo::store::TranslationMemory;
use lingo::ui;
use lingo::{android, language, shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "lingo")]
#[command(version)]
#[command(about = "Translation memory manager - sources, comments and translations in one store")]
#[command(long_about = r#"
Lingo keeps your app's base-language strings, translator comments and
per-language translations in one searchable SQLite store.

Example usage:
  lingo shell
  lingo add "Hello World" -c "shown on the launch screen"
  lingo translate "Hello World" es "Hola Mundo"
  lingo search Hello
  lingo import-android res/values/strings.xml
  lingo build-android es values-es/strings.xml
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive menu
    Shell {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Search sources by substring (use % for explicit wildcard patterns)
    Search {
        /// Search term
        term: String,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Search sources and show every translation of each match
    Translations {
        /// Search term
        term: String,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show the comments attached to a source
    Comments {
        /// Exact source text
        text: String,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Add a source string, with optional translator comments
    Add {
        /// Source text
        text: String,

        /// Translator comment (repeatable)
        #[arg(short, long = "comment")]
        comments: Vec<String>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Store a translation of an existing source
    Translate {
        /// Exact source text
        text: String,

        /// Language code (e.g. es)
        lang: String,

        /// Translated text
        translation: String,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// List supported languages and the codes present in the store
    Languages {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Show store statistics
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Import an Android strings.xml as sources
    ImportAndroid {
        /// Path to strings.xml
        path: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Build a per-language Android strings.xml from stored translations
    BuildAndroid {
        /// Language code (e.g. es)
        lang: String,

        /// Output path
        out: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Write a lingo.toml config file
    Init {
        /// Database path to record in the config
        #[arg(short, long)]
        database: Option<String>,

        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn open_store(database: Option<PathBuf>) -> anyhow::Result<TranslationMemory> {
    let path = config::resolve_database(database)?;
    config::ensure_db_dir(&path)?;
    Ok(TranslationMemory::open(&path)?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Shell { database } => {
            let tm = open_store(database)?;
            shell::run(&tm)?;
        }

        Commands::Search { term, database, format } => {
            let tm = open_store(database)?;
            let hits = tm.search_sources(&term)?;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                ui::empty("No sources matched.");
            } else {
                for hit in hits {
                    ui::source_line(&hit.source);
                }
            }
        }

        Commands::Translations { term, database, format } => {
            let tm = open_store(database)?;
            let hits = tm.search_translations(&term)?;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                ui::empty("No sources matched.");
            } else {
                for hit in hits {
                    ui::source_line(&hit.source);
                    for t in &hit.translations {
                        ui::translation_line(&t.lang, &t.text);
                    }
                }
            }
        }

        Commands::Comments { text, database } => {
            let tm = open_store(database)?;
            match tm.comments_for_source(&text)? {
                None => anyhow::bail!("no source with text: {}", text),
                Some(comments) if comments.is_empty() => ui::empty("No comments."),
                Some(comments) => {
                    for comment in comments {
                        println!("- {}", comment);
                    }
                }
            }
        }

        Commands::Add { text, comments, database } => {
            let tm = open_store(database)?;
            let guid = tm.add_source(&text, &comments)?;
            ui::success(&format!("Stored source {}", ui::dim(&guid)));
        }

        Commands::Translate { text, lang, translation, database } => {
            let tm = open_store(database)?;
            let guid = tm
                .guid_for_source(&text)?
                .ok_or_else(|| anyhow::anyhow!("no source with text: {}", text))?;
            tm.add_translation(&guid, &lang, &translation)?;
            ui::success(&format!(
                "Stored {} translation of {}",
                language::display_name(&lang),
                text
            ));
        }

        Commands::Languages { database } => {
            let tm = open_store(database)?;
            ui::info("In store", &tm.existing_language_codes()?.join(", "));
            println!("{}", ui::language_table(lingo::SUPPORTED_LANGUAGES));
        }

        Commands::Stats { database } => {
            let tm = open_store(database)?;
            println!("{}", ui::stats_table(&tm.stats()?));
        }

        Commands::ImportAndroid { path, database } => {
            let tm = open_store(database)?;
            let stats = android::import_strings(&tm, &path)?;
            ui::success(&format!(
                "Imported {} entries ({} new)",
                stats.total, stats.created
            ));
        }

        Commands::BuildAndroid { lang, out, database } => {
            let tm = open_store(database)?;
            let stats = android::build_strings(&tm, &lang, &out)?;
            ui::success(&format!("Wrote {} entries to {}", stats.written, out.display()));
            if stats.missing > 0 {
                ui::warn(&format!("{} sources have no {} translation", stats.missing, lang));
            }
        }

        Commands::Init { database, force } => {
            let config = config::LingoConfig { database };
            config::write_config(&config::default_config_path(), &config, force)?;
            ui::success("Wrote lingo.toml");
        }
    }

    Ok(())
}
