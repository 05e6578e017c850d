use std::collections::HashMap;

use plshuffle::config::{
    Config, ConfigError, DEFAULT_API_URL, DEFAULT_REDIRECT_URI, DEFAULT_SCOPE,
    DEFAULT_SERVER_ADDRESS,
};

fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[("SPOTIFY_API_AUTH_CLIENT_ID", "abc")]).unwrap();

    assert_eq!(config.client_id, "abc");
    assert_eq!(config.client_secret, None);
    assert_eq!(config.redirect_uri, DEFAULT_REDIRECT_URI);
    assert_eq!(config.scope, DEFAULT_SCOPE);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.server_address.to_string(), DEFAULT_SERVER_ADDRESS);
    assert_eq!(config.server_url(), "http://127.0.0.1:8080");
}

#[test]
fn test_missing_client_id() {
    assert_eq!(
        config_from(&[]).unwrap_err(),
        ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID")
    );
    assert_eq!(
        config_from(&[("SPOTIFY_API_AUTH_CLIENT_ID", "   ")]).unwrap_err(),
        ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID")
    );
}

#[test]
fn test_empty_secret_is_unset() {
    let config = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "abc"),
        ("SPOTIFY_API_AUTH_CLIENT_SECRET", ""),
    ])
    .unwrap();
    assert_eq!(config.client_secret, None);

    let config = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "abc"),
        ("SPOTIFY_API_AUTH_CLIENT_SECRET", "s3cret"),
    ])
    .unwrap();
    assert_eq!(config.client_secret.as_deref(), Some("s3cret"));
}

#[test]
fn test_invalid_server_address() {
    let err = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "abc"),
        ("SERVER_ADDRESS", "localhost"),
    ])
    .unwrap_err();

    assert!(matches!(
        err,
        ConfigError::Invalid {
            var: "SERVER_ADDRESS",
            ..
        }
    ));
}

#[test]
fn test_overrides() {
    let config = config_from(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "abc"),
        ("SERVER_ADDRESS", "0.0.0.0:3000"),
        ("SPOTIFY_API_REDIRECT_URI", "http://example.test/callback"),
        ("SPOTIFY_API_URL", "http://127.0.0.1:9999/v1/"),
    ])
    .unwrap();

    assert_eq!(config.server_address.port(), 3000);
    assert_eq!(config.redirect_uri, "http://example.test/callback");
    assert_eq!(config.api_url, "http://127.0.0.1:9999/v1");
}

#[test]
fn test_api_endpoint() {
    let config = config_from(&[("SPOTIFY_API_AUTH_CLIENT_ID", "abc")]).unwrap();

    assert_eq!(
        config.api_endpoint("me/playlists"),
        "https://api.spotify.com/v1/me/playlists"
    );
    assert_eq!(
        config.api_endpoint("/playlists/xyz"),
        "https://api.spotify.com/v1/playlists/xyz"
    );
}
