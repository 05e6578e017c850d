use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    random_alphanumeric(16)
}

pub fn generate_session_id() -> String {
    random_alphanumeric(32)
}

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Checks a name for the copied playlist.
///
/// The name is trimmed, must not be blank and must not match any of the
/// user's existing playlist names exactly.
pub fn validate_playlist_name(name: &str, existing: &[String]) -> Result<String, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Please enter a playlist name.");
    }
    if existing.iter().any(|n| n == name) {
        return Err("That name is already in use!");
    }
    Ok(name.to_string())
}

/// Extracts the playlist id from a bare id, a `spotify:playlist:` URI or an
/// `open.spotify.com/playlist/` link.
pub fn parse_playlist_id(input: &str) -> Option<String> {
    let input = input.trim();

    let id = if let Some(rest) = input.strip_prefix("spotify:playlist:") {
        rest
    } else if let Some((_, rest)) = input.split_once("open.spotify.com/playlist/") {
        rest.split(['?', '#', '/']).next().unwrap_or_default()
    } else {
        input
    };

    if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(id.to_string())
    } else {
        None
    }
}

/// Default description for a shuffled copy.
pub fn copy_description(source_name: &str) -> String {
    format!("Shuffled copy of {source_name}.")
}
