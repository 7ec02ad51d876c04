use serde::Deserialize;

/// TMDB settings loaded from environment variables.
///
/// The API key is a secret, so it travels through the environment (or a
/// `.env` file) rather than argv.
#[derive(Debug, Deserialize, Clone)]
pub struct TmdbConfig {
    /// TMDB API key (required)
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

impl TmdbConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<TmdbConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load TMDB config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url() {
        assert_eq!(default_tmdb_api_url(), "https://api.themoviedb.org/3");
    }
}
