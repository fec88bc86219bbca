//! Configuration integration tests
//!
//! File loading, environment-style overrides and validation of the
//! assembled configuration.

#[cfg(test)]
mod tests {
    use certcheck::CertError;
    use certcheck::config::loader::{ENV_ENDPOINT, ENV_MAX_ATTEMPTS, ENV_PROXY_PORT, ENV_PROXY_SERVER};
    use certcheck::config::{Config, ProxyKind};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    /// The shipped example file is a valid configuration
    #[tokio::test]
    async fn test_example_config_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/certcheck.example.yaml");
        let config = crate::assert_ok!(Config::from_file(path).await);
        assert_eq!(config.input.name_column, 3);
        assert_eq!(config.input.id_column, 5);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.query.absent_marker, "暂无数据");
    }

    /// Overrides win over file values, then validation sees the result
    #[tokio::test]
    async fn test_overrides_applied_after_file() {
        let file = write_config(
            r#"
query:
  endpoint: "https://old.example/lookup"
  proxy:
    kind: socks5
    server: "10.0.0.1"
    port: 1080
    username: "alice"
    password: "pw"
retry:
  max_attempts: 2
"#,
        );
        let mut config = Config::from_file(file.path()).await.unwrap();
        config
            .apply_overrides(overrides(&[
                (ENV_ENDPOINT, "https://new.example/lookup"),
                (ENV_MAX_ATTEMPTS, "5"),
                (ENV_PROXY_SERVER, "10.0.0.2"),
                (ENV_PROXY_PORT, "1081"),
            ]))
            .unwrap();
        assert!(config.validate().is_ok());

        assert_eq!(config.query.endpoint, "https://new.example/lookup");
        assert_eq!(config.retry.max_attempts, 5);
        let proxy = config.query.proxy.unwrap();
        assert_eq!(proxy.server, "10.0.0.2");
        assert_eq!(proxy.port, 1081);
        assert_eq!(proxy.kind, ProxyKind::Socks5);
        assert_eq!(proxy.username.as_deref(), Some("alice"));
    }

    /// A zero attempt budget from the environment is caught by validation
    #[test]
    fn test_zero_attempts_override_fails_validation() {
        let mut config = Config::default();
        config
            .apply_overrides(overrides(&[(ENV_MAX_ATTEMPTS, "0")]))
            .unwrap();
        let err = crate::assert_err!(config.validate());
        assert!(matches!(err, CertError::Config(msg) if msg.contains("max_attempts")));
    }

    #[test]
    fn test_non_numeric_override_is_config_error() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(overrides(&[(ENV_MAX_ATTEMPTS, "many")]))
            .unwrap_err();
        assert!(matches!(err, CertError::Config(_)));
    }

    #[tokio::test]
    async fn test_colliding_columns_rejected() {
        let file = write_config("input:\n  name_column: 4\n  id_column: 4\n");
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, CertError::Config(msg) if msg.contains("Input config")));
    }

    #[tokio::test]
    async fn test_malformed_yaml_is_yaml_error() {
        let file = write_config("retry: [unclosed\n");
        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, CertError::Yaml(_)));
    }
}
