use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub base_url: String,
    pub port: u16,
    pub store: Store,
    pub limits: Limits,
    /// When set, a request may pin the clock with an `x-test-now-ms` header.
    #[serde(default)]
    pub test_mode: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Store {
    pub kind: StoreKind,
    pub database: Database,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Database,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Limits {
    pub max_content_length: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let config: Config = toml::from_str(
            r#"
            base_url = "https://paste.example.com"
            port = 8080

            [store]
            kind = "database"

            [store.database]
            url = "sqlite:vanishbin.db"

            [limits]
            max_content_length = 1048576
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(matches!(config.store.kind, StoreKind::Database));
        assert!(!config.test_mode);
    }

    #[test]
    fn test_mode_is_opt_in() {
        let config: Config = toml::from_str(
            r#"
            base_url = "http://localhost:8080"
            port = 8080
            test_mode = true

            [store]
            kind = "memory"

            [store.database]
            url = "sqlite::memory:"

            [limits]
            max_content_length = 4096
            "#,
        )
        .unwrap();

        assert!(config.test_mode);
        assert!(matches!(config.store.kind, StoreKind::Memory));
    }
}
