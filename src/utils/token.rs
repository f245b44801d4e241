use data_encoding::BASE64URL_NOPAD;
use rand::RngCore;

/// Generates a URL-safe one-time token with 256 bits of entropy, used for
/// email verification and password reset links.
pub fn generate_one_time_token() -> String {
    let mut rng = rand::thread_rng();
    let mut bytes = [0u8; 32];
    rng.fill_bytes(&mut bytes);
    BASE64URL_NOPAD.encode(&bytes)
}
