//! Configuration parsing and management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the tinyweb.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub docs: DocsConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    String::from("/")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,

    #[serde(default)]
    pub tagline: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root of the content tree; projects live in `<content>/projects`
    #[serde(default = "default_content")]
    pub content: PathBuf,

    /// Bundled JSON collections
    #[serde(default = "default_data")]
    pub data: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Files copied verbatim into the build and served as-is
    #[serde(default, rename = "static")]
    pub static_dir: Option<PathBuf>,
}

fn default_content() -> PathBuf {
    PathBuf::from("content")
}

fn default_data() -> PathBuf {
    PathBuf::from("data")
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: default_content(),
            data: default_data(),
            output: default_output(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Remote document list; the bundled docs.json is used when unset
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    String::from("127.0.0.1")
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from YAML text; paths stay relative to the cwd
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Directory holding the project content files
    pub fn projects_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.content).join("projects")
    }

    /// Directory holding the bundled JSON collections
    pub fn data_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.data)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    pub fn static_dir(&self) -> Option<PathBuf> {
        self.paths.static_dir.as_ref().map(|p| self.resolve_path(p))
    }

    /// Local document list used when no endpoint is configured
    pub fn docs_file(&self) -> PathBuf {
        self.data_dir().join("site").join("docs.json")
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(parent) = self.config_path.as_ref().and_then(|p| p.parent()) {
            parent.join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Get a nested config value using dotted path (e.g., "site.title")
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["site", "title"] => Some(self.site.title.clone()),
            ["site", "tagline"] => self.site.tagline.clone(),
            ["site", "description"] => self.site.description.clone(),
            ["site", "url"] => self.site.url.clone(),
            ["docs", "endpoint"] => self.docs.endpoint.clone(),
            ["docs", "timeout_secs"] => Some(self.docs.timeout_secs.to_string()),
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),
            ["base_url"] => Some(self.base_url.clone()),
            _ => None,
        }
    }

    /// Normalized base URL with leading and trailing slash ("/foo/" or "/")
    pub fn normalized_base_url(&self) -> String {
        normalize_base_url(&self.base_url)
    }
}

/// Ensure base URLs have a leading and trailing slash
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MINIMAL: &str = r#"
site:
  title: "Teeny Tiny Web"
"#;

    #[test]
    fn test_default_values() {
        let config = Config::from_yaml(MINIMAL).unwrap();

        assert_eq!(config.base_url, "/");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.docs.timeout_secs, 10);
        assert!(config.docs.endpoint.is_none());
        assert_eq!(config.projects_dir(), PathBuf::from("content/projects"));
        assert_eq!(config.docs_file(), PathBuf::from("data/site/docs.json"));
        assert_eq!(config.static_dir(), None);
    }

    #[test]
    fn test_paths_resolve_relative_to_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tinyweb.yml");
        std::fs::write(
            &path,
            r#"
site:
  title: "Site"
paths:
  content: "pages"
  output: "/tmp/out"
  static: "public"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.projects_dir(), dir.path().join("pages/projects"));
        assert_eq!(config.output_dir(), PathBuf::from("/tmp/out"));
        assert_eq!(config.static_dir(), Some(dir.path().join("public")));
        assert_eq!(config.data_dir(), dir.path().join("data"));
    }

    #[test]
    fn test_get_nested_value() {
        let config = Config::from_yaml(
            r#"
site:
  title: "My Site"
  tagline: "Small but mighty"
docs:
  endpoint: "http://localhost:9000/api/docs"
server:
  port: 8080
"#,
        )
        .unwrap();

        assert_eq!(config.get("site.title"), Some("My Site".into()));
        assert_eq!(config.get("site.tagline"), Some("Small but mighty".into()));
        assert_eq!(config.get("site.url"), None);
        assert_eq!(
            config.get("docs.endpoint"),
            Some("http://localhost:9000/api/docs".into())
        );
        assert_eq!(config.get("server.port"), Some("8080".into()));
        assert_eq!(config.get("nonexistent.key"), None);
    }

    #[test]
    fn test_missing_site_is_an_error() {
        assert!(matches!(
            Config::from_yaml("paths:\n  content: x\n"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(""), "/");
        assert_eq!(normalize_base_url("/"), "/");
        assert_eq!(normalize_base_url("blog"), "/blog/");
        assert_eq!(normalize_base_url("//blog//posts/"), "/blog/posts/");
    }
}
