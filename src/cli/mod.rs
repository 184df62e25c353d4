use clap::Parser;
use crate::llm::{ DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL };
use crate::reply::{ DEFAULT_BRAND_NAME, DEFAULT_TRAINING_MESSAGE };

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Conversation Log Args ---
    /// Conversation log store type (file, redis, memory)
    #[arg(long, env = "HISTORY_TYPE", default_value = "file")]
    pub history_type: String,

    /// Path of the JSON array file used by the file store.
    #[arg(long, env = "HISTORY_PATH", default_value = "chat_logs.json")]
    pub history_path: String,

    /// Redis endpoint used by the redis store (e.g., redis://127.0.0.1:6379)
    #[arg(long, env = "HISTORY_HOST", default_value = "redis://127.0.0.1:6379")]
    pub history_host: String,

    /// Redis list key that receives one entry per exchange.
    #[arg(long, env = "HISTORY_REDIS_KEY", default_value = "chat_logs")]
    pub history_redis_key: String,

    // --- Chat LLM Provider Args ---
    /// Google API key for the Gemini generative-language API
    #[arg(long, env = "GOOGLE_API_KEY", default_value = "", hide_env_values = true)]
    pub chat_api_key: String,

    /// Model name for chat completion (e.g., gemini-pro, gemini-1.5-flash)
    #[arg(long, env = "CHAT_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub chat_model: String,

    /// Base URL of the generative-language API
    #[arg(long, env = "CHAT_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub chat_base_url: String,

    /// Seconds to wait for a model reply. Unset waits indefinitely.
    #[arg(long, env = "CHAT_TIMEOUT_SECS")]
    pub chat_timeout_secs: Option<u64>,

    // --- Reply Args ---
    /// Name substituted for restricted terms and used in greetings.
    #[arg(long, env = "BRAND_NAME", default_value = DEFAULT_BRAND_NAME)]
    pub brand_name: String,

    /// Reply sent with a 500 status whenever a request cannot be served.
    #[arg(long, env = "TRAINING_MESSAGE", default_value = DEFAULT_TRAINING_MESSAGE)]
    pub training_message: String,

    // --- General App Args ---
    /// Host address and port for the server to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:5000")]
    pub server_addr: String,

    /// Optional path to the TLS certificate file (PEM format). Requires --tls-key-path.
    #[arg(long, env = "TLS_CERT_PATH")]
    pub tls_cert_path: Option<String>,

    /// Optional path to the TLS private key file (PEM format). Requires --tls-cert-path.
    #[arg(long, env = "TLS_KEY_PATH")]
    pub tls_key_path: Option<String>,

    #[arg(long, env = "ENABLE_TLS", default_value = "false")]
    pub enable_tls: bool,
}
