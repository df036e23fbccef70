use rollbook::utils::credential::{decode_password, encode_password, verify_password};

const KEY: &str = "rollbook-test-key-2024";

#[test]
fn test_round_trip() {
    let token = encode_password("Secret1", "9990001111", KEY);
    let decoded = decode_password(&token, "9990001111", KEY);

    assert_eq!(decoded.as_deref(), Some("Secret1"));
}

#[test]
fn test_decode_with_wrong_salt_returns_none() {
    let token = encode_password("Secret1", "9990001111", KEY);

    assert_eq!(decode_password(&token, "9990009999", KEY), None);
}

#[test]
fn test_salt_changes_token_for_same_password() {
    let token_a = encode_password("samepassword", "1112223333", KEY);
    let token_b = encode_password("samepassword", "4445556666", KEY);

    assert_ne!(token_a, token_b);
}

#[test]
fn test_token_is_deterministic_for_same_inputs() {
    let token_a = encode_password("Secret1", "9990001111", KEY);
    let token_b = encode_password("Secret1", "9990001111", KEY);

    assert_eq!(token_a, token_b);
}

#[test]
fn test_verify_correct_password() {
    let token = encode_password("correct horse", "5550001111", KEY);

    assert!(verify_password("correct horse", &token, "5550001111", KEY));
}

#[test]
fn test_verify_wrong_password() {
    let token = encode_password("correct horse", "5550001111", KEY);

    assert!(!verify_password("wrong horse", &token, "5550001111", KEY));
}

#[test]
fn test_verify_wrong_key() {
    let token = encode_password("Secret1", "9990001111", KEY);

    assert!(!verify_password("Secret1", &token, "9990001111", "a-different-key"));
}

#[test]
fn test_tampered_token_does_not_panic() {
    let token = encode_password("Secret1", "9990001111", KEY);

    // Flip the first character to a different base64 symbol.
    let mut chars: Vec<char> = token.chars().collect();
    chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
    let tampered: String = chars.into_iter().collect();

    // Either the decode fails outright or it yields a different
    // plaintext; it must never crash.
    match decode_password(&tampered, "9990001111", KEY) {
        None => {}
        Some(plaintext) => assert_ne!(plaintext, "Secret1"),
    }
}

#[test]
fn test_malformed_base64_returns_none() {
    assert_eq!(decode_password("not base64!!!", "9990001111", KEY), None);
    assert_eq!(decode_password("", "9990001111", KEY), None);
}

#[test]
fn test_empty_password_round_trips() {
    let token = encode_password("", "9990001111", KEY);

    assert_eq!(decode_password(&token, "9990001111", KEY).as_deref(), Some(""));
}

#[test]
fn test_unicode_password_round_trips() {
    let password = "пароль密码";
    let token = encode_password(password, "9990001111", KEY);

    assert_eq!(
        decode_password(&token, "9990001111", KEY).as_deref(),
        Some(password)
    );
}

#[test]
fn test_special_characters_round_trip() {
    let password = "p@ssw0rd!#$%^&*()";
    let token = encode_password(password, "9990001111", KEY);

    assert!(verify_password(password, &token, "9990001111", KEY));
}

#[test]
fn test_long_password_round_trips() {
    let password = "a".repeat(200);
    let token = encode_password(&password, "9990001111", KEY);

    assert!(verify_password(&password, &token, "9990001111", KEY));
}

#[test]
fn test_password_containing_separator_fails_closed() {
    // '|' delimits the embedded salt, so a password containing it cannot
    // survive decoding. It must degrade to invalid credentials, not
    // crash.
    let token = encode_password("pass|word", "9990001111", KEY);

    assert_eq!(decode_password(&token, "9990001111", KEY), None);
    assert!(!verify_password("pass|word", &token, "9990001111", KEY));
}

#[test]
fn test_token_copied_to_other_record_fails() {
    // A token written for one mobile number must not authenticate under
    // another record's salt.
    let token = encode_password("Secret1", "1110000000", KEY);

    assert!(!verify_password("Secret1", &token, "2220000000", KEY));
}
