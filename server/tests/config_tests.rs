use sentiment_server::{AppState, ServerConfig};
use std::path::PathBuf;

#[test]
fn test_config_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 5000);
    assert_eq!(config.max_length, 500);
    assert_eq!(config.vocab_limit, 10_000);
    assert_eq!(config.server_address(), "0.0.0.0:5000");
    assert!(config.word_index_url.is_some());
    assert!(config.validate().is_ok());
}

#[test]
fn test_predictor_config_mirrors_server_config() {
    let mut config = ServerConfig::default();
    config.max_length = 200;
    config.lstm_model_path = PathBuf::from("/models/a.onnx");

    let predictor_config = config.predictor_config();
    assert_eq!(predictor_config.max_length, 200);
    assert_eq!(predictor_config.vocab_limit, 10_000);
    assert_eq!(predictor_config.lstm_model_path, PathBuf::from("/models/a.onnx"));
    assert_eq!(predictor_config.rnn_model_path, config.rnn_model_path);
}

#[test]
fn test_config_validation_rejects_zero_values() {
    let mut config = ServerConfig::default();
    config.port = 0;
    assert!(config.validate().is_err());

    let mut config = ServerConfig::default();
    config.max_length = 0;
    assert!(config.validate().is_err());

    let mut config = ServerConfig::default();
    config.vocab_limit = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_rejects_empty_fields() {
    let mut config = ServerConfig::default();
    config.host = String::new();
    assert!(config.validate().is_err());

    let mut config = ServerConfig::default();
    config.rnn_model_path = PathBuf::new();
    assert!(config.validate().is_err());

    let mut config = ServerConfig::default();
    config.word_index_path = PathBuf::new();
    assert!(config.validate().is_err());
}

#[tokio::test]
async fn test_failed_startup_leaves_models_unloaded() {
    let dir = tempfile::tempdir().unwrap();
    let word_index = dir.path().join("imdb_word_index.json");
    std::fs::write(&word_index, r#"{"the": 1, "movie": 17}"#).unwrap();

    let mut config = ServerConfig::default();
    config.word_index_path = word_index;
    config.word_index_url = None;
    config.lstm_model_path = dir.path().join("missing_lstm.onnx");
    config.rnn_model_path = dir.path().join("missing_rnn.onnx");

    let vocabulary = sentiment_server::state::load_vocabulary(&config).await.unwrap();
    assert_eq!(vocabulary.get("movie"), Some(20));

    let state = AppState::initialize(&config).await;
    assert!(!state.models_loaded());
    assert!(state.predictor().is_none());
}

#[tokio::test]
async fn test_missing_word_index_offline_fails() {
    let dir = tempfile::tempdir().unwrap();

    let mut config = ServerConfig::default();
    config.word_index_path = dir.path().join("absent.json");
    config.word_index_url = None;

    assert!(sentiment_server::state::load_vocabulary(&config).await.is_err());
    assert!(!AppState::initialize(&config).await.models_loaded());
}
