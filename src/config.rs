use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// Where the manifest lives and how it is fetched and rendered.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    pub owner: String,
    pub repo: String,
    pub content_path: String,
    /// Directory holding uploaded media. Not read by the fetch path.
    pub content_dir: String,
    /// Not passed to the API; the default branch is always resolved.
    pub branch: String,
    pub api_base: String,
    pub github_token: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub escape_markup: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            owner: "zrh-tech".to_string(),
            repo: "zrh-tech.github.io".to_string(),
            content_path: "content.json".to_string(),
            content_dir: "content".to_string(),
            branch: "main".to_string(),
            api_base: "https://api.github.com".to_string(),
            github_token: None,
            request_timeout_secs: None,
            escape_markup: false,
        }
    }
}

impl GalleryConfig {
    /// Defaults, then the TOML file, then `GALLERY_*` environment overrides.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        cfg.apply_env(|k| std::env::var(k).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config: {}", path.display()))
    }

    pub(crate) fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        if let Some(v) = get("GALLERY_OWNER") { self.owner = v; }
        if let Some(v) = get("GALLERY_REPO") { self.repo = v; }
        if let Some(v) = get("GALLERY_CONTENT_PATH") { self.content_path = v; }
        if let Some(v) = get("GALLERY_BRANCH") { self.branch = v; }
        if let Some(v) = get("GALLERY_API_BASE") { self.api_base = v; }
        if let Some(v) = get("GALLERY_GITHUB_TOKEN") { self.github_token = Some(v); }
        if let Some(secs) = get("GALLERY_TIMEOUT_SECS").and_then(|s| s.parse().ok()) { self.request_timeout_secs = Some(secs); }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("owner", &self.owner), ("repo", &self.repo), ("content_path", &self.content_path)] {
            if value.trim().is_empty() { bail!("config field `{}` must not be empty", name); }
        }
        Url::parse(&self.api_base).with_context(|| format!("invalid api_base: {}", self.api_base))?;
        Ok(())
    }
}

/// `config.toml` inside the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "gallery", "gallery").map(|p| p.config_dir().join("config.toml"))
}
