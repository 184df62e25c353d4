pub mod agent;
pub mod cli;
pub mod clock;
pub mod error;
pub mod history;
pub mod llm;
pub mod models;
pub mod reply;
pub mod server;

#[cfg(test)]
mod test_support;

use agent::ChatAgent;
use cli::Args;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat Model: {}", args.chat_model);
    info!("Chat Base URL: {}", args.chat_base_url);
    info!("Chat API Key Set: {}", !args.chat_api_key.is_empty());
    match args.chat_timeout_secs {
        Some(secs) => info!("Chat Timeout: {}s", secs),
        None => info!("Chat Timeout: none"),
    }
    info!("History Store Type: {}", args.history_type);
    info!("Brand Name: {}", args.brand_name);
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let agent = Arc::new(ChatAgent::from_args(&args)?);
    let server = Server::new(agent, args.clone());
    server.run().await?;

    Ok(())
}
