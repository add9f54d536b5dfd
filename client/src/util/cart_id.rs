//! Anonymous cart identifier.
//!
//! The cart API keys guest carts by a short random id kept in `localStorage`,
//! generated on first use and reused afterwards.

#[cfg(test)]
#[path = "cart_id_test.rs"]
mod cart_id_test;

use crate::config::CART_ID_STORAGE_KEY;

pub const CART_ID_LEN: usize = 6;
const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Map random bytes onto a [`CART_ID_LEN`]-character alphanumeric id.
pub fn cart_id_from_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take(CART_ID_LEN)
        .map(|b| char::from(ALPHABET[usize::from(*b) % ALPHABET.len()]))
        .collect()
}

/// Whether `value` looks like an id produced by [`cart_id_from_bytes`].
pub fn is_valid_cart_id(value: &str) -> bool {
    value.len() == CART_ID_LEN && value.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Return the persisted cart id, creating one on first use.
pub fn cart_id() -> String {
    if let Some(existing) = crate::util::storage::load_string(CART_ID_STORAGE_KEY).filter(|v| is_valid_cart_id(v)) {
        return existing;
    }
    let generated = cart_id_from_bytes(uuid::Uuid::new_v4().as_bytes());
    crate::util::storage::save_string(CART_ID_STORAGE_KEY, &generated);
    generated
}
