//! Configuration management
//!
//! 設定は以下の優先順位で読み込まれます:
//! 1. 環境変数
//! 2. neuronpedia-mcp.toml 設定ファイル
//! 3. デフォルト値
//!
//! 設定ファイル内では `${VAR_NAME}` 形式で環境変数を展開できます。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

/// Default Neuronpedia API endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.neuronpedia.org/api";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "NEURONPEDIA_API_KEY";

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "neuronpedia-mcp.toml";

/// Neuronpedia API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeuronpediaConfig {
    /// API key sent as `x-api-key`
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of the API
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for NeuronpediaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
        }
    }
}

impl NeuronpediaConfig {
    /// The API key, treating an empty string as unset
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

/// MCP server identity advertised on initialize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_name")]
    pub name: String,

    #[serde(default = "default_server_version")]
    pub version: String,

    /// Optional usage hint for MCP clients
    #[serde(default)]
    pub instructions: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            version: default_server_version(),
            instructions: None,
        }
    }
}

/// Tool catalog options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Expose `score_explanation` and `delete_explanation`
    #[serde(default)]
    pub explanation_admin: bool,
}

/// Main configuration for neuronpedia-mcp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub neuronpedia: NeuronpediaConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_server_name() -> String {
    "neuronpedia-mcp".to_string()
}

fn default_server_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Config {
    /// 設定ファイルから環境変数を展開する
    ///
    /// `${VAR_NAME}` 形式の文字列を環境変数の値に置換します。
    /// 環境変数が存在しない場合は空文字列になります。
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // '{' を消費

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if !var_name.is_empty() {
                    if let Ok(env_value) = std::env::var(&var_name) {
                        result.push_str(&env_value);
                    }
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// TOML 設定ファイルから設定を読み込む
    ///
    /// 設定ファイル内の `${VAR_NAME}` は環境変数の値に置換され、
    /// その後環境変数による上書きが適用されます。
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let mut cfg = Self::from_toml_str(&toml_content)?;
        cfg.apply_env_overrides();

        Ok(cfg)
    }

    /// Parse a TOML document after `${VAR}` expansion, without env overrides
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let expanded_content = Self::expand_env_vars(content);

        let toml: TomlConfig = toml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        Ok(Self::from_toml_config(toml))
    }

    /// 設定を読み込む
    ///
    /// 以下の順序で設定ファイルを探します:
    /// 1. 引数で指定されたパス
    /// 2. `NEURONPEDIA_MCP_CONFIG` 環境変数
    /// 3. `./neuronpedia-mcp.toml`
    /// 4. 見つからない場合は環境変数のみ
    pub fn load(explicit_path: Option<&Path>) -> crate::Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_toml_file(path);
        }

        if let Some(path) = non_empty_env("NEURONPEDIA_MCP_CONFIG") {
            return Self::from_toml_file(path);
        }

        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_toml_file(DEFAULT_CONFIG_FILE);
        }

        Ok(Self::from_env())
    }

    /// Load configuration from environment variables only
    ///
    /// A missing API key is not an error here; tool calls report it.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        cfg
    }

    /// TOML 構造から Config を構築
    fn from_toml_config(toml: TomlConfig) -> Self {
        let np = toml.neuronpedia.unwrap_or_default();
        let server = toml.server.unwrap_or_default();
        let tools = toml.tools.unwrap_or_default();

        Config {
            neuronpedia: NeuronpediaConfig {
                api_key: np.api_key.filter(|k| !k.is_empty()),
                base_url: np
                    .base_url
                    .filter(|u| !u.is_empty())
                    .unwrap_or_else(default_base_url),
            },
            server: ServerConfig {
                name: server.name.unwrap_or_else(default_server_name),
                version: server.version.unwrap_or_else(default_server_version),
                instructions: server.instructions,
            },
            tools: ToolsConfig {
                explanation_admin: tools.explanation_admin.unwrap_or(false),
            },
        }
    }

    /// 環境変数で設定を上書きする
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(api_key) = lookup(API_KEY_ENV) {
            self.neuronpedia.api_key = Some(api_key);
        }
        if let Some(base_url) = lookup("NEURONPEDIA_BASE_URL") {
            self.neuronpedia.base_url = base_url;
        }
        if let Some(flag) = lookup("NEURONPEDIA_EXPLANATION_ADMIN") {
            self.tools.explanation_admin = matches!(
                flag.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// ============================================================================
// TOML 構造体定義（ファイル解析用）
// ============================================================================

#[derive(Debug, Deserialize)]
struct TomlConfig {
    neuronpedia: Option<TomlNeuronpediaConfig>,
    server: Option<TomlServerConfig>,
    tools: Option<TomlToolsConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlNeuronpediaConfig {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlServerConfig {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    instructions: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlToolsConfig {
    #[serde(default)]
    explanation_admin: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.neuronpedia.base_url, "https://www.neuronpedia.org/api");
        assert!(config.neuronpedia.api_key().is_none());
        assert_eq!(config.server.name, "neuronpedia-mcp");
        assert!(!config.tools.explanation_admin);
    }

    #[test]
    fn test_empty_api_key_is_unset() {
        let config = NeuronpediaConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup_from(&[
            ("NEURONPEDIA_API_KEY", "secret"),
            ("NEURONPEDIA_BASE_URL", "http://localhost:3000/api"),
            ("NEURONPEDIA_EXPLANATION_ADMIN", "true"),
        ]));

        assert_eq!(config.neuronpedia.api_key(), Some("secret"));
        assert_eq!(config.neuronpedia.base_url, "http://localhost:3000/api");
        assert!(config.tools.explanation_admin);
    }

    #[test]
    fn test_empty_env_values_do_not_override() {
        let mut config = Config::from_toml_str(
            r#"
[neuronpedia]
api_key = "from_file"
"#,
        )
        .unwrap();
        config.apply_overrides(lookup_from(&[("NEURONPEDIA_API_KEY", "")]));

        assert_eq!(config.neuronpedia.api_key(), Some("from_file"));
    }

    #[test]
    fn test_expand_env_vars() {
        // テスト用環境変数を設定
        unsafe {
            std::env::set_var("NP_MCP_EXPAND_TEST_VAR", "test_value");
        }

        let result = Config::expand_env_vars("prefix_${NP_MCP_EXPAND_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");

        // 存在しない環境変数
        let result = Config::expand_env_vars("prefix_${NP_MCP_NONEXISTENT_VAR}_suffix");
        assert_eq!(result, "prefix__suffix");

        unsafe {
            std::env::remove_var("NP_MCP_EXPAND_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_no_braces() {
        assert_eq!(Config::expand_env_vars("no $vars here"), "no $vars here");
        assert_eq!(Config::expand_env_vars("${}_content"), "_content");
    }

    #[test]
    fn test_toml_config_parsing() {
        let toml_content = r#"
[neuronpedia]
api_key = "test_key"
base_url = "https://np.example.com/api"

[server]
name = "np"
instructions = "Use search_explanations first."

[tools]
explanation_admin = true
"#;

        let config = Config::from_toml_str(toml_content).unwrap();
        assert_eq!(config.neuronpedia.api_key(), Some("test_key"));
        assert_eq!(config.neuronpedia.base_url, "https://np.example.com/api");
        assert_eq!(config.server.name, "np");
        assert_eq!(config.server.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(
            config.server.instructions.as_deref(),
            Some("Use search_explanations first.")
        );
        assert!(config.tools.explanation_admin);
    }

    #[test]
    fn test_toml_config_missing_sections() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.neuronpedia.base_url, DEFAULT_BASE_URL);
        assert!(config.neuronpedia.api_key().is_none());
        assert!(!config.tools.explanation_admin);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("[neuronpedia\napi_key = 1").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = Config::from_toml_file("/nonexistent/neuronpedia-mcp.toml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("/nonexistent/neuronpedia-mcp.toml"));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[tools]").unwrap();
        writeln!(file, "explanation_admin = true").unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert!(config.tools.explanation_admin);
    }
}
