use crate::settings::error::SettingsError;
use std::{collections::HashMap, fs, path::Path, str::FromStr};

/// Environment variable manager that loads from the process and .env files
#[derive(Debug, Clone)]
pub struct EnvManager {
    vars: HashMap<String, String>,
}

impl EnvManager {
    pub fn new() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Manager over a fixed set of variables, ignoring the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Load variables from a .env file. File entries override existing ones.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SettingsError::EnvFile(format!("Failed to read env file {}: {}", path.display(), e))
        })?;

        self.parse_env_content(&content)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn require(&self, key: &str) -> Result<&str, SettingsError> {
        self.get(key)
            .ok_or_else(|| SettingsError::Missing(key.to_string()))
    }

    /// Parses `key` if set, falling back to `default` otherwise.
    pub fn parse_or<T>(&self, key: &str, default: T) -> Result<T, SettingsError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|e: T::Err| SettingsError::Invalid {
                key: key.to_string(),
                value: raw.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn parse_env_content(&mut self, content: &str) -> Result<(), SettingsError> {
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);

            let Some((key, value)) = line.split_once('=') else {
                return Err(SettingsError::EnvFile(format!(
                    "Invalid env file: malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                )));
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(SettingsError::EnvFile(format!(
                    "Invalid env file: empty key at line {}",
                    line_num + 1
                )));
            }

            self.vars
                .insert(key.to_string(), Self::unquote_value(value));
        }

        Ok(())
    }

    fn unquote_value(value: &str) -> String {
        let value = value.trim();

        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
                return value[1..value.len() - 1].to_string();
            }
        }

        value.to_string()
    }
}

impl Default for EnvManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn empty() -> EnvManager {
        EnvManager::from_vars(Vec::<(String, String)>::new())
    }

    #[test]
    fn test_parse_basic_env() {
        let mut env = empty();
        let content = r#"
# Comment
ARIEL_BASE_URL=https://siem.local
export ARIEL_WINDOW=100
        "#;

        env.parse_env_content(content).unwrap();
        assert_eq!(env.get("ARIEL_BASE_URL"), Some("https://siem.local"));
        assert_eq!(env.get("ARIEL_WINDOW"), Some("100"));
    }

    #[test]
    fn test_parse_quoted_values() {
        let mut env = empty();
        let content = r#"
QUOTED="value with spaces"
SINGLE='single quoted'
UNQUOTED=no_spaces
        "#;

        env.parse_env_content(content).unwrap();
        assert_eq!(env.get("QUOTED"), Some("value with spaces"));
        assert_eq!(env.get("SINGLE"), Some("single quoted"));
        assert_eq!(env.get("UNQUOTED"), Some("no_spaces"));
    }

    #[test]
    fn test_invalid_env_format() {
        let mut env = empty();
        assert!(env.parse_env_content("INVALID LINE WITHOUT EQUALS").is_err());
        assert!(env.parse_env_content("=value").is_err());
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let env = EnvManager::from_vars([("ARIEL_SEC_TOKEN", "  ")]);
        assert_eq!(env.get("ARIEL_SEC_TOKEN"), None);
        assert!(matches!(
            env.require("ARIEL_SEC_TOKEN"),
            Err(SettingsError::Missing(_))
        ));
    }

    #[test]
    fn test_parse_or() {
        let env = EnvManager::from_vars([("WINDOW", "25"), ("BROKEN", "lots")]);

        assert_eq!(env.parse_or("WINDOW", 50usize).unwrap(), 25);
        assert_eq!(env.parse_or("UNSET", 50usize).unwrap(), 50);
        assert!(matches!(
            env.parse_or("BROKEN", 50usize),
            Err(SettingsError::Invalid { .. })
        ));
    }

    #[test]
    fn test_file_overrides_existing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ARIEL_WINDOW=10").unwrap();

        let mut env = EnvManager::from_vars([("ARIEL_WINDOW", "99")]);
        env.load_from_file(file.path()).unwrap();

        assert_eq!(env.get("ARIEL_WINDOW"), Some("10"));
    }

    #[test]
    fn test_missing_file() {
        let mut env = empty();
        let err = env.load_from_file("/nonexistent/.env").unwrap_err();
        assert!(matches!(err, SettingsError::EnvFile(_)));
    }
}
