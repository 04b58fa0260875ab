use std::env;

/// Razorpay API credentials. The key secret doubles as the HMAC key for
/// payment-callback signatures.
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub razorpay: RazorpayConfig,
    pub allowed_origins: Vec<String>,
    pub dev_mode: bool,
}

impl Config {
    /// Load configuration from the environment (and `.env` if present).
    ///
    /// Panics when the gateway credentials are missing; the server must not
    /// start without a signing secret.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let dev_mode = env::var("PROPMATICS_ENV")
            .map(|v| v == "dev" || v == "development")
            .unwrap_or(false);

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(4242);

        let razorpay = RazorpayConfig {
            key_id: env::var("RAZORPAY_KEY_ID").expect("RAZORPAY_KEY_ID must be set"),
            key_secret: env::var("RAZORPAY_KEY_SECRET").expect("RAZORPAY_KEY_SECRET must be set"),
        };

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "https://propmatics.com".to_string(),
                    "https://www.propmatics.com".to_string(),
                ]
            });

        Self {
            host,
            port,
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "propmatics.db".to_string()),
            razorpay,
            allowed_origins,
            dev_mode,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
