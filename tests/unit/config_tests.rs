// =============
// tests/unit/config_tests.rs
// =============
use figment::Jail;
use std::path::Path;
use tenantry_backend::{
    config::{Settings, SettingsError},
    storage::FlatFileStore,
    AppState, StateError,
};

#[test]
fn test_explicit_config_file_replaces_default_location() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
            [server]
            port = 1111
            "#,
        )?;
        jail.create_file(
            "custom.toml",
            r#"
            [server]
            host = "0.0.0.0"
            port = 2222

            [storage]
            path = "/var/lib/tenantry"

            [auth]
            jwt_secret = "custom-secret-custom-secret-custom-secret"
            "#,
        )?;

        let settings = Settings::load_from(Some(Path::new("custom.toml"))).expect("loads");
        assert_eq!(settings.server.bind_addr(), "0.0.0.0:2222");
        assert_eq!(settings.storage.path, Path::new("/var/lib/tenantry"));
        assert_eq!(settings.auth.token_ttl_secs, 900);
        Ok(())
    });
}

#[test]
fn test_secret_from_environment_only() {
    Jail::expect_with(|jail| {
        jail.set_env("TENANTRY_AUTH__JWT_SECRET", "env-secret-env-secret-env-secret-env");
        jail.set_env("TENANTRY_SERVER__PORT", "9090");

        let settings = Settings::load().expect("loads");
        assert_eq!(settings.auth.jwt_secret, "env-secret-env-secret-env-secret-env");
        assert_eq!(settings.server.port, 9090);
        Ok(())
    });
}

#[test]
fn test_unparseable_value_is_a_load_error() {
    Jail::expect_with(|jail| {
        jail.set_env("TENANTRY_SERVER__PORT", "not-a-port");

        let err = Settings::load().unwrap_err();
        assert!(matches!(err, SettingsError::Load(_)));
        Ok(())
    });
}

#[test]
fn test_app_state_refuses_invalid_settings() {
    let result = AppState::new(FlatFileStore::in_memory(), Settings::default());
    assert!(matches!(result, Err(StateError::Settings(_))));
}
