//! Voice Assistant
//!
//! Bootstraps a voice-agent session:
//! - Loads `.env` and initialises logging
//! - Builds the tool configuration and the tool registry once
//! - Describes the speech pipeline the hosted session driver should run
//! - Offers a console for calling tools by name, as the language model would
//!
//! Run with: cargo run --bin voice-assistant
//! Pass `--offline` to answer search and encyclopedia lookups from canned providers.

mod config;
mod console;

use config::{DEFAULT_INSTRUCTIONS, PipelineConfig, SessionSpec};
use console::Command;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voice_agent_tools::mock::{StaticEncyclopedia, StaticSearch};
use voice_agent_tools::{
    HttpClient, RunContext, ToolRegistry, ToolsConfig, default_registry, registry_with,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let offline = std::env::args().skip(1).any(|arg| arg == "--offline");

    let tools_config = ToolsConfig::from_env()?;
    let registry = build_registry(&tools_config, offline)?;

    let pipeline = PipelineConfig::from_env();
    let instructions = std::env::var("VOICE_AGENT_INSTRUCTIONS")
        .unwrap_or_else(|_| DEFAULT_INSTRUCTIONS.to_string());
    let session = SessionSpec::new(pipeline, instructions, &registry);

    info!(
        stt = %session.pipeline.stt_model,
        llm = %session.pipeline.llm_model,
        tts = %session.pipeline.tts_model,
        offline,
        "Voice pipeline configured"
    );
    info!(tools = ?registry.list_tools(), "Tool catalogue ready");

    let ctx = RunContext::new(uuid::Uuid::new_v4().to_string());
    info!(session = ctx.session_id(), "Session started");

    println!("=== Voice Assistant Tool Console ===\n");
    println!("{}\n", console::USAGE);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        match console::parse(&line) {
            Command::Empty => {}
            Command::Help => println!("{}", console::USAGE),
            Command::List => {
                for tool in registry.get_tools() {
                    println!("  {:<18} {}", tool.name, tool.description);
                }
            }
            Command::Session => println!("{}", serde_json::to_string_pretty(&session)?),
            Command::Schema(name) => match registry.get_tool(&name) {
                Some(tool) => println!("{}", serde_json::to_string_pretty(&tool.input_schema)?),
                None => println!("Unknown tool: {name}"),
            },
            Command::Call { name, input } => match registry.execute(&name, &ctx, &input).await {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    warn!(tool = %name, error = %e, "Tool call rejected");
                    println!("Error: {e}");
                }
            },
            Command::Quit => break,
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

/// Build the registry, swapping in canned library-backed providers when offline
fn build_registry(
    config: &ToolsConfig,
    offline: bool,
) -> Result<ToolRegistry, Box<dyn std::error::Error>> {
    if !offline {
        return Ok(default_registry(config)?);
    }

    let http = HttpClient::new(config)?;
    Ok(registry_with(
        &http,
        config,
        Arc::new(StaticSearch::results("Search is offline; this is a canned result.")),
        Arc::new(StaticEncyclopedia::summary(
            "The encyclopedia is offline; this is a canned summary.",
        )),
    ))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voice_assistant=info,voice_agent_tools=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
