//! Credentials from the environment (optionally seeded from a `.env` file)

use std::path::Path;

use super::error::ConfigError;

pub const SF_USERNAME: &str = "SF_USERNAME";
pub const SF_PASSWORD: &str = "SF_PASSWORD";
pub const SF_SECURITY_TOKEN: &str = "SF_SECURITY_TOKEN";
pub const HUBSPOT_ACCESS_TOKEN: &str = "HUBSPOT_ACCESS_TOKEN";
/// Older name for the private app token
pub const HUBSPOT_API_KEY: &str = "HUBSPOT_API_KEY";

/// Load variables from an env file without overriding ones already set.
/// Returns whether the file existed.
pub fn load_env_file(path: &Path) -> anyhow::Result<bool> {
    if !path.exists() {
        log::warn!(".env file not found at {}", path.display());
        return Ok(false);
    }

    dotenvy::from_path(path)
        .map_err(|e| anyhow::anyhow!("Failed to load env file {}: {}", path.display(), e))?;
    log::info!("Loaded environment variables from {}", path.display());
    Ok(true)
}

#[derive(Clone, PartialEq, Eq)]
pub struct SalesforceCredentials {
    pub username: String,
    pub password: String,
    pub security_token: String,
}

impl std::fmt::Debug for SalesforceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("security_token", &"***")
            .finish()
    }
}

impl SalesforceCredentials {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; every missing variable is reported
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let username = read(SF_USERNAME);
        let password = read(SF_PASSWORD);
        let security_token = read(SF_SECURITY_TOKEN);

        match (username, password, security_token) {
            (Some(username), Some(password), Some(security_token)) => Ok(Self {
                username,
                password,
                security_token,
            }),
            (username, password, security_token) => {
                let missing = [
                    (SF_USERNAME, username.is_none()),
                    (SF_PASSWORD, password.is_none()),
                    (SF_SECURITY_TOKEN, security_token.is_none()),
                ]
                .into_iter()
                .filter(|(_, is_missing)| *is_missing)
                .map(|(key, _)| key.to_string())
                .collect();
                Err(ConfigError::MissingCredentials { missing })
            }
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct HubSpotCredentials {
    pub access_token: String,
}

impl std::fmt::Debug for HubSpotCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubSpotCredentials")
            .field("access_token", &"***")
            .finish()
    }
}

impl HubSpotCredentials {
    /// `None` when no token is configured
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        present(HUBSPOT_ACCESS_TOKEN)
            .or_else(|| present(HUBSPOT_API_KEY))
            .map(|access_token| Self { access_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_salesforce_credentials_complete() {
        let creds = SalesforceCredentials::from_lookup(lookup(&[
            (SF_USERNAME, "ops@acme.com"),
            (SF_PASSWORD, "secret"),
            (SF_SECURITY_TOKEN, "token"),
        ]))
        .unwrap();
        assert_eq!(creds.username, "ops@acme.com");
        assert!(!format!("{:?}", creds).contains("secret"));
    }

    #[test]
    fn test_salesforce_credentials_report_every_missing_variable() {
        let err = SalesforceCredentials::from_lookup(lookup(&[(SF_USERNAME, "ops@acme.com"), (SF_PASSWORD, " ")]))
            .unwrap_err();
        match err {
            ConfigError::MissingCredentials { missing } => {
                assert_eq!(missing, vec![SF_PASSWORD.to_string(), SF_SECURITY_TOKEN.to_string()]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_hubspot_token_fallback() {
        assert!(HubSpotCredentials::from_lookup(lookup(&[])).is_none());
        let creds = HubSpotCredentials::from_lookup(lookup(&[(HUBSPOT_API_KEY, "pat-legacy")])).unwrap();
        assert_eq!(creds.access_token, "pat-legacy");
        let creds = HubSpotCredentials::from_lookup(lookup(&[
            (HUBSPOT_ACCESS_TOKEN, "pat-new"),
            (HUBSPOT_API_KEY, "pat-legacy"),
        ]))
        .unwrap();
        assert_eq!(creds.access_token, "pat-new");
    }

    #[test]
    fn test_blank_hubspot_token_falls_back_to_api_key() {
        let creds = HubSpotCredentials::from_lookup(lookup(&[
            (HUBSPOT_ACCESS_TOKEN, "  "),
            (HUBSPOT_API_KEY, "pat-legacy"),
        ]))
        .unwrap();
        assert_eq!(creds.access_token, "pat-legacy");

        assert!(HubSpotCredentials::from_lookup(lookup(&[(HUBSPOT_ACCESS_TOKEN, ""), (HUBSPOT_API_KEY, "")])).is_none());
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        assert!(!load_env_file(Path::new("/nonexistent/.env")).unwrap());
    }
}
