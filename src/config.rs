//! Client configuration: account credentials and the endpoint to query.

use crate::endpoint::Endpoint;
use crate::error::ConfigError;
use std::fmt;

/// Environment variable holding the associate tag.
pub const ENV_ASSOCIATE_TAG: &str = "AMZ_ASSOCIATE_TAG";
/// Environment variable holding the access key id.
pub const ENV_ACCESS_KEY: &str = "AMZ_ACCESS_KEY";
/// Environment variable holding the secret key.
pub const ENV_SECRET_KEY: &str = "AMZ_SECRET_KEY";

/// Account credentials used to identify and sign every request.
#[derive(Clone)]
pub struct Credentials {
    associate_tag: String,
    access_key_id: String,
    secret_key: String,
}

impl Credentials {
    /// Creates credentials from explicit values.
    pub fn new(
        associate_tag: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            associate_tag: associate_tag.into(),
            access_key_id: access_key_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Loads credentials from `AMZ_ASSOCIATE_TAG`, `AMZ_ACCESS_KEY` and
    /// `AMZ_SECRET_KEY`. Reports every missing or empty variable at once.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut missing = Vec::new();

        let mut read = |name: &'static str| -> String {
            match std::env::var(name) {
                Ok(value) if !value.is_empty() => value,
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let associate_tag = read(ENV_ASSOCIATE_TAG);
        let access_key_id = read(ENV_ACCESS_KEY);
        let secret_key = read(ENV_SECRET_KEY);

        if !missing.is_empty() {
            return Err(ConfigError::MissingEnv(missing));
        }

        Ok(Self { associate_tag, access_key_id, secret_key })
    }

    /// Returns the associate tag sent with every request.
    pub fn associate_tag(&self) -> &str {
        &self.associate_tag
    }

    /// Returns the access key id sent with every request.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Returns the secret key used to sign requests.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("associate_tag", &self.associate_tag)
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Everything the client needs to build and send a request.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: Endpoint,
    pub credentials: Credentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = Credentials::new("mytag-20", "AKIAEXAMPLE", "secret");
        assert_eq!(creds.associate_tag(), "mytag-20");
        assert_eq!(creds.access_key_id(), "AKIAEXAMPLE");
        assert_eq!(creds.secret_key(), "secret");
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("mytag-20", "AKIAEXAMPLE", "super-secret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("mytag-20"));
        assert!(debug.contains("AKIAEXAMPLE"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_credentials_from_env() {
        // Single test covers set, missing and empty cases so parallel test
        // runs never race on the shared process environment.
        let saved: Vec<(&str, Option<String>)> =
            [ENV_ASSOCIATE_TAG, ENV_ACCESS_KEY, ENV_SECRET_KEY]
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect();

        std::env::set_var(ENV_ASSOCIATE_TAG, "envtag-20");
        std::env::set_var(ENV_ACCESS_KEY, "AKIAFROMENV");
        std::env::set_var(ENV_SECRET_KEY, "envsecret");

        let creds = Credentials::from_env().unwrap();
        assert_eq!(creds.associate_tag(), "envtag-20");
        assert_eq!(creds.access_key_id(), "AKIAFROMENV");
        assert_eq!(creds.secret_key(), "envsecret");

        // Empty counts as missing, and every absent name is reported.
        std::env::set_var(ENV_ACCESS_KEY, "");
        std::env::remove_var(ENV_SECRET_KEY);

        let err = Credentials::from_env().unwrap_err();
        match &err {
            ConfigError::MissingEnv(names) => {
                assert_eq!(names, &vec![ENV_ACCESS_KEY, ENV_SECRET_KEY]);
            }
            other => panic!("expected MissingEnv, got {:?}", other),
        }
        let msg = err.to_string();
        assert!(msg.contains("AMZ_ACCESS_KEY"));
        assert!(msg.contains("AMZ_SECRET_KEY"));
        assert!(!msg.contains("AMZ_ASSOCIATE_TAG"));

        for (name, value) in saved {
            match value {
                Some(v) => std::env::set_var(name, v),
                None => std::env::remove_var(name),
            }
        }
    }
}
