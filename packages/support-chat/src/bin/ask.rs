//! Ask the support assistant one question from the command line
//!
//! Reads configuration from the environment (and `.env`), runs the full reply
//! flow, and prints the answer. `--json` prints the whole reply envelope,
//! including the retrieved resources; `--resources-only` skips the LLM.
//! `--journal` treats the message as a journal entry and prints its analysis.

use anyhow::Result;
use clap::Parser;
use support_chat::{
    analyze_journal_entry, generate_reply, preview_resources, ChatDeps, ChatRequest, Config, Persona,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ask")]
#[command(about = "Ask the support assistant a question")]
struct Cli {
    /// Message to send
    message: String,

    /// Where the user is (e.g. "Oakland", "SF")
    #[arg(long)]
    location: Option<String>,

    /// Free-text situation (e.g. "family with two kids")
    #[arg(long)]
    situation: Option<String>,

    /// Free-text needs (e.g. "food and housing")
    #[arg(long)]
    needs: Option<String>,

    /// User's name
    #[arg(long)]
    name: Option<String>,

    /// empathetic_coach or direct_assistant (defaults to CHAT_PERSONA)
    #[arg(long)]
    persona: Option<Persona>,

    /// Print the full reply envelope as JSON
    #[arg(long)]
    json: bool,

    /// Only show the resources that would be sent to the LLM
    #[arg(long)]
    resources_only: bool,

    /// Analyze the message as a journal entry (prints JSON)
    #[arg(long, conflicts_with = "resources_only")]
    journal: bool,
}

impl Cli {
    fn to_request(&self) -> ChatRequest {
        let mut request = ChatRequest::new(&self.message);
        request.context.location = self.location.clone();
        request.context.situation = self.situation.clone();
        request.context.needs = self.needs.clone();
        request.context.name = self.name.clone();
        request.persona = self.persona;
        request
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr, so stdout stays clean for --json)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,support_chat=info,resource_engine=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let deps = ChatDeps::from_config(&config)?;
    let request = cli.to_request();

    if cli.resources_only {
        match preview_resources(&deps, &request) {
            Some(result) if cli.json => println!("{}", serde_json::to_string_pretty(&result)?),
            Some(result) => print!("{}", resource_engine::format_for_prompt(&result)),
            None => anyhow::bail!("--resources-only needs --location"),
        }
        return Ok(());
    }

    if cli.journal {
        let analysis = analyze_journal_entry(&deps, &cli.message, Some(&request.context)).await;
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    let mut conversation = deps.start_conversation(None);
    let reply = generate_reply(&deps, &mut conversation, &request).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", reply.response);
        if reply.used_fallback {
            tracing::warn!("LLM unavailable, printed the fallback reply");
        }
    }

    Ok(())
}
