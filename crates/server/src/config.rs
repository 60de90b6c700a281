use anyhow::{Context, Result};
use data_loader::ModelIndex;
use serde::Deserialize;
use std::path::PathBuf;

/// Prefix shared by every environment variable the server reads
pub const ENV_PREFIX: &str = "REEL_RECS_";

/// Server configuration loaded from `REEL_RECS_*` environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory holding movie_list.dat and similarity.dat
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// JSON bundle to load instead of `model_dir`
    #[serde(default)]
    pub model_json: Option<PathBuf>,

    /// OMDb API key
    pub omdb_api_key: String,

    /// OMDb base URL
    #[serde(default = "default_omdb_base_url")]
    pub omdb_base_url: String,

    /// Recommendations per query
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Title the harness queries on startup
    #[serde(default = "default_sample_title")]
    pub sample_title: String,
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("data/model")
}

fn default_omdb_base_url() -> String {
    metadata_client::omdb::DEFAULT_BASE_URL.to_string()
}

fn default_recommendation_limit() -> usize {
    engine::DEFAULT_LIMIT
}

fn default_sample_title() -> String {
    "Avatar".to_string()
}

impl Config {
    /// Load configuration from the environment (and a `.env` file if present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load the model from the JSON bundle if one is configured, otherwise
    /// from the model directory
    pub fn load_model(&self) -> Result<ModelIndex> {
        match &self.model_json {
            Some(path) => ModelIndex::load_from_json(path)
                .with_context(|| format!("Failed to load model bundle {}", path.display())),
            None => ModelIndex::load_from_dir(&self.model_dir)
                .with_context(|| format!("Failed to load model from {}", self.model_dir.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[("REEL_RECS_OMDB_API_KEY", "abc")])).unwrap();

        assert_eq!(config.omdb_api_key, "abc");
        assert_eq!(config.model_dir, PathBuf::from("data/model"));
        assert!(config.model_json.is_none());
        assert_eq!(config.omdb_base_url, "http://www.omdbapi.com");
        assert_eq!(config.recommendation_limit, 5);
        assert_eq!(config.sample_title, "Avatar");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(vars(&[
            ("REEL_RECS_OMDB_API_KEY", "abc"),
            ("REEL_RECS_MODEL_JSON", "/tmp/model.json"),
            ("REEL_RECS_RECOMMENDATION_LIMIT", "3"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();

        assert_eq!(config.model_json, Some(PathBuf::from("/tmp/model.json")));
        assert_eq!(config.recommendation_limit, 3);
    }

    #[test]
    fn test_missing_api_key() {
        assert!(Config::from_vars(vars(&[])).is_err());
    }
}
