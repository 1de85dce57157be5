//! Tests for configuration merging and validation.

use std::time::Duration;

use super::cli::Cli;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;
use super::validated::{ValidatedConfig, write_default_config};

fn cli(args: &[&str]) -> Cli {
    Cli::parse_from_iter(std::iter::once("order-attribution").chain(args.iter().copied()))
}

fn report_cli(extra: &[&str]) -> Cli {
    let mut args = vec!["report", "--order", "o.json", "--credential", "c2VjcmV0"];
    args.extend_from_slice(extra);
    cli(&args)
}

mod defaults {
    use super::*;

    #[test]
    fn report_with_only_credential_uses_defaults() {
        let config = ValidatedConfig::from_raw(&report_cli(&[]), None).unwrap();

        assert_eq!(config.base_url.as_str(), "https://api.usebutton.com/");
        assert!(config.user_agent.starts_with("order-attribution/"));
        assert_eq!(config.credential.as_deref(), Some("c2VjcmV0"));
        assert!(config.application_id.is_none());
        assert_eq!(config.retry_policy.max_retries, 3);
        assert_eq!(config.retry_policy.base_interval, Duration::from_millis(100));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(!config.verbose);
    }

    #[test]
    fn client_options_carry_resolved_values() {
        let config = ValidatedConfig::from_raw(
            &report_cli(&["--base-url", "http://localhost:9000", "--retry-max", "1"]),
            None,
        )
        .unwrap();
        let options = config.client_options();

        assert_eq!(options.base_url.as_str(), "http://localhost:9000/");
        assert_eq!(options.user_agent, config.user_agent);
        assert_eq!(options.retry_policy.max_retries, 1);
    }
}

mod required_fields {
    use super::*;

    #[test]
    fn report_without_credential_fails() {
        let err = ValidatedConfig::from_raw(&cli(&["report", "--order", "o.json"]), None)
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingRequired { field: f, .. } if f == field::CREDENTIAL
        ));
    }

    #[test]
    fn track_without_application_id_fails() {
        let err = ValidatedConfig::from_raw(&cli(&["track", "--order", "o.json"]), None)
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingRequired { field: f, .. } if f == field::APPLICATION_ID
        ));
    }

    #[test]
    fn fetch_redirect_without_application_id_fails() {
        let err = ValidatedConfig::from_raw(&cli(&["fetch-redirect"]), None).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingRequired { field: f, .. } if f == field::APPLICATION_ID
        ));
    }

    #[test]
    fn track_does_not_need_credential() {
        let config = ValidatedConfig::from_raw(
            &cli(&["track", "--order", "o.json", "--application-id", "app-1"]),
            None,
        )
        .unwrap();

        assert_eq!(config.application_id.as_deref(), Some("app-1"));
        assert!(config.credential.is_none());
    }

    #[test]
    fn credential_can_come_from_toml() {
        let toml = TomlConfig::parse("[service]\ncredential = \"ZnJvbS10b21s\"").unwrap();
        let config =
            ValidatedConfig::from_raw(&cli(&["report", "--order", "o.json"]), Some(&toml))
                .unwrap();

        assert_eq!(config.credential.as_deref(), Some("ZnJvbS10b21s"));
    }
}

mod priority {
    use super::*;

    fn toml() -> TomlConfig {
        TomlConfig::parse(
            r#"
            [service]
            base_url = "https://toml.example.com/"
            user_agent = "toml-agent/1.0"
            credential = "dG9tbA=="

            [retry]
            max_retries = 7
            base_interval_ms = 500

            [transport]
            timeout_secs = 30
            "#,
        )
        .unwrap()
    }

    #[test]
    fn toml_overrides_defaults() {
        let config =
            ValidatedConfig::from_raw(&cli(&["report", "--order", "o.json"]), Some(&toml()))
                .unwrap();

        assert_eq!(config.base_url.as_str(), "https://toml.example.com/");
        assert_eq!(config.user_agent, "toml-agent/1.0");
        assert_eq!(config.retry_policy.max_retries, 7);
        assert_eq!(config.retry_policy.base_interval, Duration::from_millis(500));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn cli_overrides_toml() {
        let config = ValidatedConfig::from_raw(
            &report_cli(&[
                "--base-url",
                "https://cli.example.com/",
                "--user-agent",
                "cli-agent/2.0",
                "--retry-max",
                "2",
                "--retry-interval-ms",
                "50",
                "--timeout-secs",
                "5",
            ]),
            Some(&toml()),
        )
        .unwrap();

        assert_eq!(config.base_url.as_str(), "https://cli.example.com/");
        assert_eq!(config.user_agent, "cli-agent/2.0");
        assert_eq!(config.credential.as_deref(), Some("c2VjcmV0"));
        assert_eq!(config.retry_policy.max_retries, 2);
        assert_eq!(config.retry_policy.base_interval, Duration::from_millis(50));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn zero_retries_is_allowed() {
        let config = ValidatedConfig::from_raw(&report_cli(&["--retry-max", "0"]), None).unwrap();
        assert_eq!(config.retry_policy.max_retries, 0);
    }
}

mod validation {
    use super::*;

    #[test]
    fn malformed_base_url_is_rejected() {
        let err =
            ValidatedConfig::from_raw(&report_cli(&["--base-url", "not a url"]), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let err = ValidatedConfig::from_raw(&report_cli(&["--base-url", "ftp://example.com/"]), None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn user_agent_with_newline_is_rejected() {
        let err = ValidatedConfig::from_raw(&report_cli(&["--user-agent", "bad\nagent"]), None)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidUserAgent { .. }
        ));
    }

    #[test]
    fn zero_retry_interval_is_rejected() {
        let err = ValidatedConfig::from_raw(&report_cli(&["--retry-interval-ms", "0"]), None)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroInterval {
                field: "retry.base_interval_ms"
            }
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err =
            ValidatedConfig::from_raw(&report_cli(&["--timeout-secs", "0"]), None).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroInterval {
                field: "transport.timeout_secs"
            }
        ));
    }
}

mod display {
    use super::*;

    #[test]
    fn display_hides_credential() {
        let config = ValidatedConfig::from_raw(&report_cli(&[]), None).unwrap();
        let shown = config.to_string();

        assert!(shown.contains("credential: set"));
        assert!(!shown.contains("c2VjcmV0"));
        assert!(shown.contains("retry: 3x/100ms"));
    }
}

mod files {
    use super::*;

    #[test]
    fn load_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[service]\napplication_id = \"app-file\"\n\n[retry]\nmax_retries = 4\n",
        )
        .unwrap();

        let path_str = path.to_str().unwrap();
        let config = ValidatedConfig::load(&cli(&[
            "fetch-redirect",
            "--config",
            path_str,
        ]))
        .unwrap();

        assert_eq!(config.application_id.as_deref(), Some("app-file"));
        assert_eq!(config.retry_policy.max_retries, 4);
    }

    #[test]
    fn load_missing_file_is_file_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = ValidatedConfig::load(&report_cli(&["--config", path.to_str().unwrap()]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn load_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[service\n").unwrap();

        let err = ValidatedConfig::load(&report_cli(&["--config", path.to_str().unwrap()]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn written_template_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generated.toml");

        write_default_config(&path).unwrap();
        let config = ValidatedConfig::load(&report_cli(&["--config", path.to_str().unwrap()]))
            .unwrap();

        assert_eq!(config.retry_policy.max_retries, 3);
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("config.toml");

        let err = write_default_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::FileWrite { .. }));
    }
}
