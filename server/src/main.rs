use anyhow::Result;
use clap::Parser;
use sentiment_server::{AppState, SentimentServer, ServerConfig};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Environment file to load before reading SENTIMENT_* variables
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    #[arg(long)]
    lstm_model: Option<PathBuf>,

    #[arg(long)]
    rnn_model: Option<PathBuf>,

    #[arg(long)]
    word_index: Option<PathBuf>,

    /// Never download the word index; it must already exist on disk
    #[arg(long)]
    offline: bool,

    /// Classify a single review, print the JSON result and exit
    #[arg(long)]
    review: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    dotenvy::from_path(&args.env_file).ok();

    sentiment_server::init_tracing();

    let config = apply_args(ServerConfig::from_env_or_default(), &args);
    config.validate()?;

    info!(
        "Starting sentiment-server v{} on {}",
        sentiment_server::VERSION,
        config.server_address()
    );
    info!("LSTM model: {:?}", config.lstm_model_path);
    info!("RNN model: {:?}", config.rnn_model_path);
    info!("Word index: {:?}", config.word_index_path);

    if let Some(review) = args.review.as_deref() {
        let predictor = sentiment_server::state::load_predictor(&config).await?;
        let prediction = predictor.predict(review).await?;
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        return Ok(());
    }

    let state = AppState::initialize(&config).await;
    if !state.models_loaded() {
        warn!("Serving without models; /predict will fail until restart");
    }

    let server = SentimentServer::new(config, state);
    server.serve().await?;

    Ok(())
}

fn apply_args(mut config: ServerConfig, args: &Args) -> ServerConfig {
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(path) = &args.lstm_model {
        config.lstm_model_path = path.clone();
    }
    if let Some(path) = &args.rnn_model {
        config.rnn_model_path = path.clone();
    }
    if let Some(path) = &args.word_index {
        config.word_index_path = path.clone();
    }
    if args.offline {
        config.word_index_url = None;
    }
    config
}
