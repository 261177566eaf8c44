//! TOML sources: explicit file, project-local file, and precedence between them.

use std::path::Path;

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use mb_config::{BridgeConfig, ConfigError};
use pretty_assertions::assert_eq;

const FULL: &str = r#"
[teamwork]
api_key = "twp_toml"
base_url = "https://acme.teamwork.com/"

[process_street]
api_key = "ps_toml"
base_url = "http://localhost:4010"

[server]
listen = "127.0.0.1:8181"
path = "/hooks/teamwork"
max_body_bytes = 4096

[http]
timeout_secs = 30
user_agent = "bridge-test"
"#;

#[test]
fn loads_every_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", FULL)?;

        let config: BridgeConfig = Figment::from(Serialized::defaults(BridgeConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.teamwork.api_key, "twp_toml");
        assert_eq!(config.teamwork.api_base(), "https://acme.teamwork.com");
        assert_eq!(config.process_street.api_base(), "http://localhost:4010");
        assert_eq!(config.server.listen, "127.0.0.1:8181");
        assert_eq!(config.server.path, "/hooks/teamwork");
        assert_eq!(config.server.max_body_bytes, 4096);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.user_agent, "bridge-test");
        config.validate().expect("valid");
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[teamwork]
api_key = "twp_only"
"#,
        )?;

        let config = BridgeConfig::load(Some(Path::new("config.toml"))).expect("config loads");
        assert_eq!(config.teamwork.api_key, "twp_only");
        assert!(config.teamwork.base_url.is_empty());
        assert_eq!(config.process_street.base_url, "https://api.process.st");
        assert_eq!(config.server.path, "/");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing {
                field: "teamwork.base_url"
            })
        ));
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".milestone-bridge")?;
        jail.create_file(".milestone-bridge/config.toml", FULL)?;

        let config = BridgeConfig::load(None).expect("config loads");
        assert_eq!(config.teamwork.api_key, "twp_toml");
        assert_eq!(config.server.path, "/hooks/teamwork");
        Ok(())
    });
}

#[test]
fn explicit_file_beats_project_local_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".milestone-bridge")?;
        jail.create_file(".milestone-bridge/config.toml", FULL)?;
        jail.create_file(
            "override.toml",
            r#"
[http]
timeout_secs = 5
"#,
        )?;

        let config = BridgeConfig::load(Some(Path::new("override.toml"))).expect("config loads");
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.teamwork.api_key, "twp_toml");
        Ok(())
    });
}

#[test]
fn malformed_toml_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_file("broken.toml", "[http]\ntimeout_secs = \"soon\"\n")?;
        let result = BridgeConfig::load(Some(Path::new("broken.toml")));
        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}
