use std::env;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: u64 = 30;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_address: String,
    pub secret_key: String,
    pub access_token_expire_minutes: u64,
    pub cors_origins: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            secret_key: String::new(),
            access_token_expire_minutes: DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
            cors_origins: split_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Settings {
    pub fn from_env() -> Self {
        let secret_key = env::var("SECRET_KEY").expect("SECRET_KEY env var not set");
        let bind_address =
            env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
        let access_token_expire_minutes = match env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Ok(value) => value
                .parse::<u64>()
                .expect("ACCESS_TOKEN_EXPIRE_MINUTES env var is not a number"),
            Err(_) => DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
        };
        let cors_origins = split_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
        );

        Self {
            bind_address,
            secret_key,
            access_token_expire_minutes,
            cors_origins,
        }
    }
}
