//! Stagekit - Stagehand browser tools for LLM agents
//!
//! Example runner: builds an agent with the four Stagehand tools bound
//! to one shared session and drives it through a prompt or the stock
//! example turns.

use clap::Parser;
use stagekit::{Agent, Config};

/// Stagekit - Stagehand browser tools for LLM agents
#[derive(Parser, Debug)]
#[command(name = "stagekit")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Chat model driving the agent
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Browser session name
    #[arg(long, short = 's')]
    session: Option<String>,

    /// Run with a visible browser window
    #[arg(long)]
    headed: bool,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,

    /// Disable streamed output
    #[arg(long)]
    no_stream: bool,

    /// Single prompt mode (default: run the stock example turns)
    #[arg(long, short = 'p')]
    prompt: Option<String>,
}

/// The stock example conversation
const EXAMPLE_TURNS: &[&str] = &[
    "Navigate to https://www.google.com",
    "Search for 'OpenAI', use the act tool to search",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration (.env overlay happens inside load)
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(ref model) = args.model {
        config.openai.model = model.clone();
    }

    if let Some(ref session) = args.session {
        config.stagehand.session_name = session.clone();
    }

    if args.headed {
        config.stagehand.headed = true;
    }

    if args.debug {
        config.agent.debug = true;
    }

    if args.no_stream {
        config.streaming.enabled = false;
    }

    let mut agent = Agent::from_config(config)?;

    let turns: Vec<String> = match args.prompt {
        Some(prompt) => vec![prompt],
        None => EXAMPLE_TURNS.iter().map(|s| s.to_string()).collect(),
    };

    let run = async {
        for turn in &turns {
            println!("\n> {}", turn);
            let answer = agent.process(turn).await?;
            println!("{}", answer);
        }
        Ok::<(), stagekit::StagekitError>(())
    }
    .await;

    // Clean up the browser session before reporting the outcome
    if let Err(e) = agent.close().await {
        eprintln!("Warning: failed to close session: {}", e);
    }

    run?;
    println!("Session closed successfully");
    Ok(())
}
