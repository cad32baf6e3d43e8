use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub evaluator: EvaluatorConfig,
    pub practice: PracticeConfig,
    pub cors: Option<CorsConfig>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EvaluatorConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PracticeConfig {
    pub default_language: String,
    pub default_role: String,
    /// Serve and fill cached AI sample answers
    pub sample_cache: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Daily-rolling log file, in addition to stdout
    pub file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                path: get_default_db_path(),
            },
            evaluator: EvaluatorConfig {
                base_url: "http://localhost:8000".to_string(),
                timeout_secs: 30,
            },
            practice: PracticeConfig {
                default_language: "en".to_string(),
                default_role: practice_core::DEFAULT_ROLE.to_string(),
                sample_cache: true,
            },
            cors: Some(CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            }),
            logging: LoggingConfig {
                level: "info".to_string(),
                file: None,
            },
        }
    }
}

impl ApiConfig {
    /// Load from an explicit file, or from the default location (written on first run).
    /// `PRACTICE__SECTION__KEY` environment variables override both.
    pub fn load(explicit_path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = match explicit_path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = get_config_path();
                write_default_config(&path)?;
                path
            }
        };

        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let builder = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default(
                "database.path",
                defaults.database.path.to_string_lossy().to_string(),
            )?
            .set_default("evaluator.base_url", defaults.evaluator.base_url)?
            .set_default("evaluator.timeout_secs", defaults.evaluator.timeout_secs as i64)?
            .set_default("practice.default_language", defaults.practice.default_language)?
            .set_default("practice.default_role", defaults.practice.default_role)?
            .set_default("practice.sample_cache", defaults.practice.sample_cache)?
            .set_default("logging.level", defaults.logging.level)?
            .add_source(File::from(config_path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("PRACTICE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: ApiConfig = builder.try_deserialize()?;
        config.database.path = expand_tilde(&config.database.path);
        if let Some(file) = &config.logging.file {
            config.logging.file = Some(expand_tilde(file));
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn write_default_config(config_path: &Path) -> Result<(), ConfigError> {
    if config_path.exists() {
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Message(format!("Failed to create config directory: {e}"))
        })?;
    }

    let default_config = format!(
        r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
path = "{}"

[evaluator]
base_url = "http://localhost:8000"
timeout_secs = 30

[practice]
default_language = "en"
default_role = "{}"
sample_cache = true

[cors]
allowed_origins = ["http://localhost:3000"]

[logging]
level = "info"
# file = "~/.local/share/practice/logs/api.log"
"#,
        get_default_db_path().display(),
        practice_core::DEFAULT_ROLE,
    );

    std::fs::write(config_path, default_config)
        .map_err(|e| ConfigError::Message(format!("Failed to write default config: {e}")))
}

fn expand_tilde(path: &Path) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = home::home_dir() {
            let path_str = path.to_string_lossy();
            let expanded = path_str.replacen('~', &home.to_string_lossy(), 1);
            return PathBuf::from(expanded);
        }
    }
    path.to_path_buf()
}

fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("practice/api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

fn get_default_db_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        data_dir.join("practice/practice.db")
    } else {
        PathBuf::from("practice.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9090

[evaluator]
base_url = "http://ai.internal:8000"
"#
        )
        .unwrap();

        let config = ApiConfig::load_from(file.path()).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.evaluator.base_url, "http://ai.internal:8000");
        assert_eq!(config.evaluator.timeout_secs, 30);
        assert_eq!(config.practice.default_role, "BackEnd");
        assert!(config.practice.sample_cache);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_tilde_is_expanded() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[database]\npath = \"~/practice/test.db\"").unwrap();

        let config = ApiConfig::load_from(file.path()).unwrap();
        assert!(!config.database.path.starts_with("~"));
        assert!(config.database.path.ends_with("practice/test.db"));
    }

    #[test]
    fn test_default_config_file_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/api.toml");

        write_default_config(&path).unwrap();
        let config = ApiConfig::load_from(&path).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(
            config.cors.unwrap().allowed_origins,
            vec!["http://localhost:3000".to_string()]
        );
    }
}
