use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use ama_core::Result;
use ama_inference::{create_model, ChatMlCounter};
use ama_pipeline::{KnowledgeAssembler, PromptBudget, Session};
use ama_storage::{load_corpus, EmbeddingCache, FileStore};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ask-me-anything tourism assistant over a local article corpus", long_about = None)]
struct Cli {
    /// Directory holding the article corpus (*.txt, one article per file)
    #[arg(long, default_value = "articles")]
    articles: PathBuf,
    /// Directory for cached article embeddings
    #[arg(long, default_value = "embeddings")]
    embeddings: PathBuf,
    /// Model backend. Available models: openai (default), dummy
    #[arg(long, default_value = "openai")]
    model: String,
    /// Override the model API base URL
    #[arg(long)]
    base_url: Option<String>,
    /// Maximum number of articles assembled into the context
    #[arg(long, default_value_t = 5)]
    max_knowledge: usize,
    /// Token ceiling for the system message alone
    #[arg(long, default_value_t = 2500)]
    system_token_limit: usize,
    /// Token ceiling for the whole outgoing message list
    #[arg(long, default_value_t = 3500)]
    total_token_limit: usize,
    /// How many prior messages are considered for inclusion
    #[arg(long, default_value_t = 9)]
    history_window: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let api_key = std::env::var("OPENAI_API_KEY").ok();
    let (embedder, chat) = create_model(&cli.model, api_key, cli.base_url.clone())?;
    info!("🧠 Model initialized successfully (using {})", chat.name());

    let cache = EmbeddingCache::new(Arc::new(FileStore::new(&cli.embeddings)));
    let articles = load_corpus(&cli.articles).await?;
    info!("📚 Loaded {} articles from {}", articles.len(), cli.articles.display());

    let assembler = KnowledgeAssembler::with_max_knowledge(cli.max_knowledge);
    let budget = PromptBudget {
        system_token_limit: cli.system_token_limit,
        total_token_limit: cli.total_token_limit,
        history_window: cli.history_window,
        ..Default::default()
    };
    let counter = Arc::new(ChatMlCounter::new()?);

    let mut session =
        Session::bootstrap(articles, &cache, embedder, chat, counter, assembler, budget).await?;

    ama_loop(&mut session).await
}

async fn ama_loop(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    loop {
        info!("Empty or exit to exit");
        print!("AMA: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // stdin closed counts as an empty question
            line.clear();
        }
        let question = line.trim();
        if question.is_empty() || question == "exit" {
            info!("Talk to you later!");
            return Ok(());
        }

        // A failed turn is reported and the loop moves on; state stays clean.
        match session.ask(question).await {
            Ok(reply) => println!("> {reply}"),
            Err(e) => eprintln!("Turn failed: {e}"),
        }
    }
}
