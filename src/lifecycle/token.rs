use rand::Rng;

pub const TOKEN_LENGTH: usize = 10;

/// Inserts attempted per order before a token collision is treated as fatal.
pub const MAX_TOKEN_ATTEMPTS: usize = 5;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Random string of `len` characters from the URL-safe alphabet.
pub fn random_url_safe(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

pub fn generate_token() -> String {
    random_url_safe(TOKEN_LENGTH)
}

/// Cheap shape check so obviously bogus lookups never reach the database.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LENGTH && token.bytes().all(|b| ALPHABET.contains(&b))
}
