use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_feedback::{GroupingConfig, OpenAIConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub openai: OpenAIConfig,
    pub grouping: GroupingConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let openai = OpenAIConfig::from_env()?; // Requires OPENAI_API_KEY
        let grouping = GroupingConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            openai,
            grouping,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_requires_openai_key() {
        temp_env::with_var_unset("OPENAI_API_KEY", || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("OPENAI_API_KEY"));
        });
    }

    #[test]
    fn test_config_from_env() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-test")),
                ("APP_ENV", Some("production")),
                ("PORT", Some("9090")),
                ("CLUSTER_SEED", Some("3")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "feedback_api");
                assert!(config.environment.is_production());
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.grouping.seed, Some(3));
            },
        );
    }
}
