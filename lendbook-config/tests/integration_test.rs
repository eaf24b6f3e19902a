//! Integration tests for lendbook-config

use lendbook_config::*;
use std::io::Write;
use std::time::Duration;
use temp_env::with_vars;

#[test]
fn test_default_config_validation() {
    let config = LendbookConfig::default();
    assert!(config.validate_all().is_ok());
}

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("LENDBOOK_SERVER_PORT", Some("8443")),
        ("LENDBOOK_SESSION_TTL", Some("3600")),
        ("LENDBOOK_GATEWAY_URL", Some("https://auth.example.com")),
        ("LENDBOOK_GATEWAY_TIMEOUT", Some("5")),
        ("LENDBOOK_LOG_LEVEL", Some("debug")),
        ("LENDBOOK_LOG_FORMAT", Some("json")),
    ];

    with_vars(vars, || {
        let config = ConfigLoader::new().from_env().unwrap();

        assert_eq!(config.server.port, 8443);
        assert_eq!(config.session.ttl, Duration::from_secs(3600));
        assert_eq!(config.gateway.base_url, "https://auth.example.com");
        assert_eq!(config.gateway.timeout, Duration::from_secs(5));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Json);
    });
}

#[test]
fn test_invalid_env_value_is_reported() {
    with_vars(vec![("LENDBOOK_SERVER_PORT", Some("not-a-port"))], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(result, Err(ConfigError::EnvError(_))));
    });
}

#[test]
fn test_oversized_session_ttl_rejected() {
    with_vars(vec![("LENDBOOK_SESSION_TTL", Some("9000000000000"))], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(
            result,
            Err(ConfigError::DomainError { ref domain, .. }) if domain == "session"
        ));
    });
}

#[test]
fn test_production_requires_real_secret() {
    with_vars(vec![("LENDBOOK_ENVIRONMENT", Some("production"))], || {
        let result = ConfigLoader::new().from_env();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    });

    with_vars(
        vec![
            ("LENDBOOK_ENVIRONMENT", Some("production")),
            (
                "LENDBOOK_SESSION_SECRET",
                Some("a-production-secret-with-enough-entropy-0123456789"),
            ),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap();
            assert!(config.server.environment.is_production());
        },
    );
}

#[test]
fn test_custom_prefix() {
    with_vars(vec![("LOANS_SERVER_PORT", Some("9000"))], || {
        let config = ConfigLoader::with_prefix("LOANS").from_env().unwrap();
        assert_eq!(config.server.port, 9000);
    });
}

#[test]
fn test_yaml_config_serialization() {
    let yaml = LendbookConfig::generate_sample();
    let parsed: LendbookConfig = serde_yaml::from_str(&yaml).unwrap();
    assert!(parsed.validate_all().is_ok());
}

#[test]
fn test_comprehensive_config_file() {
    let yaml = r#"
server:
  bind_address: "0.0.0.0"
  port: 4000
  environment: development

session:
  secret: "dev-only-secret-dev-only-secret-000"
  ttl: 7200

gateway:
  provider: static
  static_users:
    - id: "1"
      document: "12345678"
      password: "changeme"
      role: "GERENTE"

access:
  navigation_file: "navigation.yaml"
  aliases:
    admin: [gerente]
    auditor: [agente]
  not_authorized_path: "/403"

logging:
  level: warn
  format: compact
"#;
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    with_vars(Vec::<(&str, Option<&str>)>::new(), || {
        let config = ConfigLoader::new().from_file(file.path()).unwrap();

        assert_eq!(config.server.listen_address(), "0.0.0.0:4000");
        assert_eq!(config.session.ttl, Duration::from_secs(7200));
        assert_eq!(config.session.cookie_name, "access_token");
        assert_eq!(config.gateway.provider, AuthProviderKind::Static);
        assert_eq!(config.gateway.static_users[0].role, "GERENTE");
        assert_eq!(config.access.not_authorized_path, "/403");
        assert_eq!(config.access.sign_in_path, "/auth/sign-in");
        assert_eq!(config.access.aliases.as_ref().unwrap()["auditor"], vec!["agente".to_string()]);
        assert_eq!(config.logging.level, LogLevel::Warn);
    });
}

#[test]
fn test_invalid_config_file_rejected() {
    let yaml = r#"
access:
  sign_in_path: "auth/sign-in"
"#;
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    with_vars(Vec::<(&str, Option<&str>)>::new(), || {
        let result = ConfigLoader::new().from_file(file.path());
        assert!(matches!(result, Err(ConfigError::DomainError { .. })));
    });
}

#[test]
fn test_missing_config_file() {
    let result = ConfigLoader::new().load(Some("/nonexistent/lendbook.yaml"));
    match result {
        Err(error @ ConfigError::FileReadError { .. }) => {
            assert!(error.to_string().contains("/nonexistent/lendbook.yaml"));
        }
        other => panic!("expected file read error, got {:?}", other),
    }
}

#[test]
fn test_unparsable_config_names_the_file() {
    let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    yaml.write_all(b"session: [not, a, mapping").unwrap();
    let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    json.write_all(b"{ \"session\": ").unwrap();

    with_vars(Vec::<(&str, Option<&str>)>::new(), || {
        match ConfigLoader::new().from_file(yaml.path()) {
            Err(error @ ConfigError::ParseError { .. }) => {
                assert!(error.to_string().contains(&yaml.path().display().to_string()));
            }
            other => panic!("expected YAML parse error, got {:?}", other),
        }
        assert!(matches!(
            ConfigLoader::new().from_file(json.path()),
            Err(ConfigError::JsonError { .. })
        ));
    });
}
