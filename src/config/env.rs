//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "STFU";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Verbose from STFU_VERBOSE
    pub verbose: Option<bool>,
    /// Log level from STFU_LOG
    pub log_level: Option<String>,
    /// Name column width from STFU_NAME_WIDTH
    pub name_width: Option<usize>,
    /// Description wrap width from STFU_WRAP_WIDTH
    pub wrap_width: Option<usize>,
    /// Summary format from STFU_SUMMARY
    pub summary: Option<String>,
    /// Config file from STFU_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            verbose: get_env_bool("VERBOSE"),
            log_level: get_env("LOG"),
            name_width: get_env_parse("NAME_WIDTH"),
            wrap_width: get_env_parse("WRAP_WIDTH"),
            summary: get_env("SUMMARY"),
            config_file: get_env("CONFIG"),
        }
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

/// Print all STFU environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_VERBOSE      Force verbose reports (true/false)");
    println!("  {ENV_PREFIX}_LOG          Log level (trace, debug, info, warn, error)");
    println!("  {ENV_PREFIX}_NAME_WIDTH   Width of the test name column");
    println!("  {ENV_PREFIX}_WRAP_WIDTH   Wrap column for test descriptions");
    println!("  {ENV_PREFIX}_SUMMARY      Summary format (text, json, json-pretty)");
    println!("  {ENV_PREFIX}_CONFIG       Path to configuration file");
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sets variables for the lifetime of the guard
    struct EnvGuard {
        previous: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn set(vars: &[(&str, &str)]) -> Self {
            let previous = vars
                .iter()
                .map(|(name, value)| {
                    let key = format!("{ENV_PREFIX}_{name}");
                    let old = env::var(&key).ok();
                    env::set_var(&key, value);
                    (key, old)
                })
                .collect();
            Self { previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.previous {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.verbose.is_none());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_env_load() {
        let _guard = EnvGuard::set(&[
            ("VERBOSE", "Yes"),
            ("NAME_WIDTH", "32"),
            ("WRAP_WIDTH", "not-a-number"),
            ("SUMMARY", "json"),
        ]);

        let config = EnvConfig::load();
        assert_eq!(config.verbose, Some(true));
        assert_eq!(config.name_width, Some(32));
        assert_eq!(config.wrap_width, None);
        assert_eq!(config.summary.as_deref(), Some("json"));
    }
}
