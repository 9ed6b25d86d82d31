//! tgapi CLI: call a Bot API method and print the result as JSON. Config from env and optional CLI args.

use anyhow::Result;
use clap::Parser;
use tgapi_cli::{load_config, run, Cli};
use tgapi_client::{init_tracing, Telegram};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.token)?;
    init_tracing(config.log_file.as_deref())?;

    let bot = Telegram::from_config(&config);
    info!(api_url = %bot.api_url(), command = ?cli.command, "tgapi start");

    let value = run(&bot, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
