#[tokio::main]
async fn main() -> relaybot::error::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("relaybot=info,teloxide=warn"),
    )
    .init();
    log::info!("Starting relaybot Telegram bot");

    match relaybot::run().await {
        Ok(()) => {
            log::info!("Bot shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Bot encountered an error: {e}");
            Err(e)
        }
    }
}
