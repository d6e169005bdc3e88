//! In-memory slot for the current token set
//!
//! Holds at most one [`TokenSet`] for the lifetime of its owner. Locking is
//! left to the owner; see [`TokenManager`](super::TokenManager).

use super::types::TokenSet;

/// Single-slot token cache
#[derive(Debug, Default)]
pub struct TokenStore {
    token_set: Option<TokenSet>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self { token_set: None }
    }

    pub fn get(&self) -> Option<&TokenSet> {
        self.token_set.as_ref()
    }

    pub fn set(&mut self, token_set: TokenSet) {
        self.token_set = Some(token_set);
    }

    pub fn clear(&mut self) {
        self.token_set = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(access: &str) -> TokenSet {
        TokenSet::issue(access.to_string(), None, "Bearer".to_string(), 3600)
    }

    #[test]
    fn test_starts_empty() {
        assert!(TokenStore::new().get().is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = TokenStore::new();
        store.set(tokens("first"));
        store.set(tokens("second"));
        assert_eq!(store.get().map(TokenSet::access_token), Some("second"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = TokenStore::new();
        store.clear();
        assert!(store.get().is_none());

        store.set(tokens("a"));
        store.clear();
        store.clear();
        assert!(store.get().is_none());
    }
}
