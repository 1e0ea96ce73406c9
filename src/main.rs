use fireseed::{config::SetupConfig, setup::DatabaseSetup};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let config = SetupConfig::from_env();
    tracing::debug!(?config, "Loaded setup configuration");

    let client = match config.build_client() {
        Ok(client) => client,
        Err(err) => {
            tracing::error!(error = ?err, "Could not create Firestore client");
            println!("❌ Error: {err}");
            return;
        }
    };

    let mut stdout = std::io::stdout().lock();
    match DatabaseSetup::new(client)
        .run(&mut stdout, chrono::Utc::now())
        .await
    {
        Ok(outcome) => tracing::debug!(?outcome, "Setup finished"),
        Err(err) => tracing::error!(error = %err, "Could not write to stdout"),
    }
}

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
