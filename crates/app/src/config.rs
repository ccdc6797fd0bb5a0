//! Command-line and environment configuration

use clap::Args;

use crate::firebase::FirebaseConfig;

/// Settings shared by every command.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Firebase Web API key
    #[arg(long, env = "FIREBASE_API_KEY", hide_env_values = true, global = true)]
    pub firebase_api_key: Option<String>,

    /// Firebase project id
    #[arg(long, env = "FIREBASE_PROJECT_ID", global = true)]
    pub firebase_project_id: Option<String>,

    /// Use an in-memory backend seeded with the sample catalog
    #[arg(long, env = "SKILLORBIT_DEMO", global = true)]
    pub demo: bool,
}

impl AppConfig {
    /// Firebase settings, when both the API key and project id are set.
    pub fn firebase(&self) -> Option<FirebaseConfig> {
        let api_key = self.firebase_api_key.as_deref().filter(|key| !key.is_empty())?;
        let project_id = self
            .firebase_project_id
            .as_deref()
            .filter(|project| !project.is_empty())?;

        Some(FirebaseConfig::new(api_key, project_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>, project_id: Option<&str>) -> AppConfig {
        AppConfig {
            log_level: "warn".to_string(),
            firebase_api_key: api_key.map(str::to_string),
            firebase_project_id: project_id.map(str::to_string),
            demo: false,
        }
    }

    #[test]
    fn firebase_needs_key_and_project() {
        assert!(config(Some("key"), None).firebase().is_none());
        assert!(config(Some(""), Some("project")).firebase().is_none());

        let firebase = config(Some("key"), Some("project")).firebase();
        assert_eq!(
            firebase.map(|firebase| firebase.project_id),
            Some("project".to_string())
        );
    }
}
