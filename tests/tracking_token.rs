use std::collections::HashSet;

use custom_shop::lifecycle::{TOKEN_LENGTH, generate_token, is_well_formed};

#[test]
fn tokens_are_url_safe_and_fixed_length() {
    for _ in 0..200 {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "unexpected character in {token}"
        );
        assert!(is_well_formed(&token));
    }
}

#[test]
fn tokens_do_not_repeat_in_practice() {
    let tokens: HashSet<String> = (0..1000).map(|_| generate_token()).collect();
    assert_eq!(tokens.len(), 1000);
}

#[test]
fn malformed_tokens_are_rejected() {
    assert!(!is_well_formed(""));
    assert!(!is_well_formed("short"));
    assert!(!is_well_formed("abcdefghijk"));
    assert!(!is_well_formed("abc def%gh"));
    assert!(is_well_formed("aB3-_xYz09"));
}
