use std::env;
use std::path::PathBuf;

/// Runtime configuration for the gateway, resolved once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HTTP port (default: 3000)
    pub port: u16,

    /// Flat directory holding uploaded solutions (default: `files/` next to the executable)
    pub files_dir: PathBuf,

    /// Maximum upload size in bytes (default: 10 MB)
    pub max_file_size: usize,

    /// Gemini API key. `None` disables the `/gemini` endpoint.
    pub gemini_api_key: Option<String>,

    /// Gemini model name (default: "gemini-2.5-flash")
    pub gemini_model: String,

    /// Gemini REST base URL
    pub gemini_base_url: String,

    /// Timeout for a single generation call in seconds (default: 60)
    pub gemini_timeout_secs: u64,
}

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            files_dir: default_files_dir(),
            max_file_size: 10 * 1024 * 1024, // 10 MB
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_timeout_secs: 60,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            files_dir: env::var("FILES_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default.files_dir),

            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            gemini_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            gemini_model: env::var("GEMINI_MODEL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(default.gemini_model),

            gemini_base_url: env::var("GEMINI_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(default.gemini_base_url),

            gemini_timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(default.gemini_timeout_secs),
        }
    }

    /// Config for tests and local runs: custom storage directory, no API key
    pub fn development(files_dir: impl Into<PathBuf>) -> Self {
        Self {
            files_dir: files_dir.into(),
            ..Self::default()
        }
    }
}

fn default_files_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("files")))
        .unwrap_or_else(|| PathBuf::from("files"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_file_size, 10 * 1024 * 1024);
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert!(config.gemini_api_key.is_none());
        assert!(config.files_dir.ends_with("files"));
    }

    #[test]
    fn test_development_config() {
        let config = GatewayConfig::development("/tmp/solutions");
        assert_eq!(config.files_dir, PathBuf::from("/tmp/solutions"));
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_timeout_secs, 60);
    }
}
