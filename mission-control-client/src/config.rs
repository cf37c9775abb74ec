use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const SESSION_DIR: &str = "mission-control";
const SESSION_FILE: &str = "session.json";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    /// `None` keeps the session in memory only.
    pub session_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: default_session_file(),
        }
    }
}

fn default_session_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SESSION_DIR).join(SESSION_FILE))
}

fn non_blank(value: Result<String, env::VarError>) -> Option<String> {
    value.ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Self {
        let api_url = non_blank(env::var("MISSION_CONTROL_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let session_file = non_blank(env::var("MISSION_CONTROL_SESSION_FILE"))
            .map(PathBuf::from)
            .or_else(default_session_file);

        Self {
            api_url,
            session_file,
        }
    }
}
