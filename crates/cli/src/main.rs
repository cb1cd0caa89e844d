use clap::{Parser, Subcommand};
use std::path::PathBuf;
use textlens_core::{
    config::database_location_from_env_value, constants::DEFAULT_KEYWORD_COUNT, AnalysisService,
    CoreConfig, KeywordExtractor, NonEmptyText,
};

#[derive(Parser)]
#[command(name = "textlens")]
#[command(about = "TextLens text analysis CLI")]
struct Cli {
    /// SQLite database file, or `:memory:`
    #[arg(long, global = true, env = "TEXTLENS_DATABASE")]
    database: Option<PathBuf>,
    /// Keywords extracted per text
    #[arg(long, global = true, env = "TEXTLENS_KEYWORD_COUNT", default_value_t = DEFAULT_KEYWORD_COUNT)]
    keyword_count: usize,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the keywords extracted from a text
    Keywords {
        /// Text to extract keywords from
        text: String,
        /// Number of keywords (defaults to --keyword-count)
        #[arg(long)]
        count: Option<usize>,
    },
    /// Analyse texts and store the results
    Analyze {
        /// Texts to analyse as one batch
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Search stored analyses by topic or keyword
    Search {
        /// Topic or keyword to match
        term: String,
    },
}

impl Cli {
    fn config(&self) -> Result<CoreConfig, Box<dyn std::error::Error>> {
        let database = self
            .database
            .as_ref()
            .map(|path| path.to_string_lossy().into_owned());
        Ok(CoreConfig::new(
            database_location_from_env_value(database),
            self.keyword_count,
        )?)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Some(Commands::Keywords { text, count }) => {
            let extractor = KeywordExtractor::new();
            let keywords = extractor.extract_keywords(text, count.unwrap_or(cli.keyword_count));
            if keywords.is_empty() {
                println!("No keywords found.");
            } else {
                println!("{}", keywords.join(", "));
            }
        }
        Some(Commands::Analyze { texts }) => {
            let service = AnalysisService::from_config(&cli.config()?)?;
            let records = service.analyze_batch(texts).map_err(|e| {
                eprintln!("Error analysing texts: {}", e);
                e
            })?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Some(Commands::Search { term }) => {
            let term = NonEmptyText::new(term)?;
            let service = AnalysisService::from_config(&cli.config()?)?;
            let records = service.search(&term)?;
            if records.is_empty() {
                println!("No analyses found for '{}'.", term);
            } else {
                println!("{}", serde_json::to_string_pretty(&records)?);
            }
        }
        None => {
            println!("Use 'textlens --help' for commands");
        }
    }

    Ok(())
}
