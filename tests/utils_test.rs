use plshuffle::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // SHA-256 digest is 32 bytes, 43 characters in unpadded base64
    assert_eq!(challenge.len(), 43);
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_code_challenge_known_vector() {
    // Example verifier and challenge from RFC 7636, appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_generate_state_and_session_id() {
    let state = generate_state();
    assert_eq!(state.len(), 16);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    let session = generate_session_id();
    assert_eq!(session.len(), 32);
    assert_ne!(session, generate_session_id());
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html("plain"), "plain");
    assert_eq!(
        escape_html("<script>alert(\"x\")</script>"),
        "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
    );
    assert_eq!(escape_html("Tom & Jerry's"), "Tom &amp; Jerry&#39;s");
    assert_eq!(escape_html(""), "");
}

#[test]
fn test_validate_playlist_name() {
    let existing = vec!["Bottomless Happiness".to_string(), "Road".to_string()];

    // Valid names are trimmed
    assert_eq!(
        validate_playlist_name("  Road (shuffled) ", &existing),
        Ok("Road (shuffled)".to_string())
    );

    // Blank names are rejected
    assert!(validate_playlist_name("", &existing).is_err());
    assert!(validate_playlist_name("   ", &existing).is_err());

    // Existing names are rejected, including after trimming
    assert_eq!(
        validate_playlist_name("Road", &existing),
        Err("That name is already in use!")
    );
    assert!(validate_playlist_name(" Bottomless Happiness ", &existing).is_err());

    // Matching is exact
    assert!(validate_playlist_name("road", &existing).is_ok());
}

#[test]
fn test_parse_playlist_id() {
    let id = "37i9dQZF1DXcBWIGoYBM5M";

    assert_eq!(parse_playlist_id(id), Some(id.to_string()));
    assert_eq!(
        parse_playlist_id(&format!("spotify:playlist:{id}")),
        Some(id.to_string())
    );
    assert_eq!(
        parse_playlist_id(&format!("https://open.spotify.com/playlist/{id}?si=abc123")),
        Some(id.to_string())
    );
    assert_eq!(
        parse_playlist_id(&format!("  https://open.spotify.com/playlist/{id}  ")),
        Some(id.to_string())
    );

    assert_eq!(parse_playlist_id(""), None);
    assert_eq!(parse_playlist_id("spotify:playlist:"), None);
    assert_eq!(parse_playlist_id("not a/playlist"), None);
}

#[test]
fn test_copy_description() {
    assert_eq!(copy_description("Mix"), "Shuffled copy of Mix.");
}
