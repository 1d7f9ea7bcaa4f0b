use duetask::commands::Cli;
use duetask::libs::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();
    logging::init();

    Cli::menu().await
}
