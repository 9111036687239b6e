use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "QUIZERA_API_URL";

/// Base URL used when `QUIZERA_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Where the quiz backend lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizApiConfig {
    base_url: Url,
}

impl QuizApiConfig {
    /// Parse a base URL. A trailing slash is added so endpoint paths join below it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unparsable or non-http(s) URLs.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let mut base_url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
            raw: raw.to_string(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                scheme: base_url.scheme().to_string(),
            });
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url })
    }

    /// Read `QUIZERA_API_URL` through `lookup`, falling back to [`DEFAULT_API_URL`]
    /// when it is unset or blank.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the variable holds an invalid URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(API_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        Self::parse(&raw)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint path such as `api/score` against the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| ConfigError::InvalidBaseUrl {
                raw: path.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_below_base_path() {
        let config = QuizApiConfig::parse("http://localhost:5000/quizera").unwrap();
        assert_eq!(
            config.endpoint("/api/score").unwrap().as_str(),
            "http://localhost:5000/quizera/api/score"
        );
    }

    #[test]
    fn root_base_url() {
        let config = QuizApiConfig::parse(DEFAULT_API_URL).unwrap();
        assert_eq!(
            config.endpoint("api/quiz/questions").unwrap().as_str(),
            "http://127.0.0.1:5000/api/quiz/questions"
        );
    }

    #[test]
    fn blank_or_missing_variable_uses_default() {
        for value in [None, Some("  ".to_string())] {
            let config = QuizApiConfig::from_lookup(|_| value.clone()).unwrap();
            assert_eq!(config.base_url().as_str(), "http://127.0.0.1:5000/");
        }
        let config =
            QuizApiConfig::from_lookup(|key| (key == API_URL_ENV).then(|| "https://q.example".into()))
                .unwrap();
        assert_eq!(config.base_url().as_str(), "https://q.example/");
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(matches!(
            QuizApiConfig::parse("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme { .. })
        ));
        assert!(matches!(
            QuizApiConfig::parse("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}
