//! Authenticated identity of the running client and its durable copy.
//!
//! The store is the only writer of the two persisted entries. Everything else
//! reads the [`AuthState`] snapshot or subscribes to its signal, and must hold
//! off any authorization decision while `loading` is still set.

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use chrono::{DateTime, Utc};
use futures_signals::signal::{Mutable, Signal};
use serde::Deserialize;

use crate::{
    error::SessionError,
    models::{Role, User},
};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

const JWT_PAYLOAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// String keyed durable storage, `localStorage` in the browser.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn delete(&self, key: &str);
}

/// The part of the token payload the client looks at.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Claims {
    pub exp: Option<f64>,
}

impl Claims {
    /// A missing or zero `exp` never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.exp {
            Some(exp) if exp != 0.0 => exp * 1000.0 < now.timestamp_millis() as f64,
            _ => false,
        }
    }
}

/// Reads the payload of a JWT without checking its signature, the server
/// remains the authority on whether the token is any good.
pub fn decode_claims(token: &str) -> Result<Claims, SessionError> {
    let payload = match token.split('.').collect::<Vec<_>>().as_slice() {
        [_, payload, _] if !payload.is_empty() => *payload,
        _ => return Err(SessionError::MalformedToken),
    };

    let bytes = JWT_PAYLOAD
        .decode(payload)
        .map_err(|e| SessionError::InvalidEncoding(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| SessionError::InvalidClaims(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub loading: bool,
    pub session: Option<Session>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            loading: true,
            session: None,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }
}

pub struct SessionStore<S> {
    storage: S,
    state: Mutable<AuthState>,
}

impl<S> SessionStore<S>
where
    S: SessionStorage,
{
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: Mutable::new(AuthState::default()),
        }
    }

    pub fn initialize(&self) {
        self.initialize_at(Utc::now());
    }

    /// Rehydrates the session from storage. Only the first call has an effect.
    pub fn initialize_at(&self, now: DateTime<Utc>) {
        if !self.state.lock_ref().loading {
            warn!("session store already initialized");
            return;
        }

        let session = match self.restore(now) {
            Ok(Some(session)) => {
                info!("restored session for user {}", session.user.id);
                Some(session)
            }
            Ok(None) => {
                debug!("no stored session");
                None
            }
            Err(e) => {
                warn!("discarding stored session: {}", e);
                self.clear_storage();
                None
            }
        };

        self.state.set(AuthState {
            loading: false,
            session,
        });
    }

    fn restore(&self, now: DateTime<Utc>) -> Result<Option<Session>, SessionError> {
        let (Some(token), Some(user)) = (self.storage.get(TOKEN_KEY), self.storage.get(USER_KEY))
        else {
            return Ok(None);
        };

        let claims = decode_claims(&token)?;
        if claims.is_expired_at(now) {
            return Err(SessionError::Expired(claims.exp.unwrap_or_default() as i64));
        }

        let user: User =
            serde_json::from_str(&user).map_err(|e| SessionError::InvalidUser(e.to_string()))?;

        Ok(Some(Session { token, user }))
    }

    /// Persists a session issued by the server, the token is taken as is.
    pub fn login(&self, token: String, user: User) -> Result<(), SessionError> {
        let user_json =
            serde_json::to_string(&user).map_err(|e| SessionError::InvalidUser(e.to_string()))?;

        self.storage.set(TOKEN_KEY, &token);
        self.storage.set(USER_KEY, &user_json);

        info!("user {} logged in as {}", user.id, user.role);
        self.state.set(AuthState {
            loading: false,
            session: Some(Session { token, user }),
        });

        Ok(())
    }

    pub fn logout(&self) {
        self.clear_storage();

        let mut state = self.state.lock_mut();
        if let Some(session) = state.session.take() {
            info!("user {} logged out", session.user.id);
        }
        state.loading = false;
    }

    /// Replaces the in memory and stored user record, used when `me` returns
    /// a fresher profile. Ignored when nobody is logged in.
    pub fn refresh_user(&self, user: User) {
        if self.state.lock_ref().user().is_none_or(|current| *current == user) {
            return;
        }

        let json = match serde_json::to_string(&user) {
            Ok(json) => json,
            Err(e) => {
                error!("failed to serialize user: {}", e);
                return;
            }
        };

        self.storage.set(USER_KEY, &json);
        if let Some(session) = self.state.lock_mut().session.as_mut() {
            session.user = user;
        }
    }

    fn clear_storage(&self) {
        self.storage.delete(TOKEN_KEY);
        self.storage.delete(USER_KEY);
    }

    pub fn state(&self) -> AuthState {
        self.state.get_cloned()
    }

    pub fn token(&self) -> Option<String> {
        self.state.lock_ref().token().map(str::to_string)
    }

    pub fn signal(&self) -> impl Signal<Item = AuthState> + use<S> {
        self.state.signal_cloned()
    }
}

#[cfg(test)]
mod test {
    use std::{cell::RefCell, collections::HashMap, rc::Rc};

    use chrono::TimeZone;
    use futures::StreamExt;
    use futures_signals::signal::SignalExt;

    use super::*;

    #[derive(Debug, Clone, Default)]
    struct MemoryStorage {
        entries: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MemoryStorage {
        fn new() -> Self {
            Self::default()
        }

        fn len(&self) -> usize {
            self.entries.borrow().len()
        }

        fn is_empty(&self) -> bool {
            self.entries.borrow().is_empty()
        }
    }

    impl SessionStorage for MemoryStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }

        fn delete(&self, key: &str) {
            self.entries.borrow_mut().remove(key);
        }
    }

    fn token_with_payload(payload: &str) -> String {
        let header = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(payload);
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    fn token_expiring_at(exp: i64) -> String {
        token_with_payload(&format!(r#"{{"sub":"1","exp":{exp}}}"#))
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn hr_user() -> User {
        User {
            id: "1".to_string(),
            name: "Helen Ross".to_string(),
            email: "helen@corp.io".to_string(),
            role: Role::Hr,
        }
    }

    fn store_with(
        token: Option<&str>,
        user: Option<&User>,
    ) -> (SessionStore<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        if let Some(token) = token {
            storage.set(TOKEN_KEY, token);
        }
        if let Some(user) = user {
            storage.set(USER_KEY, &serde_json::to_string(user).unwrap());
        }
        (SessionStore::new(storage.clone()), storage)
    }

    fn assert_consistent(state: &AuthState) {
        assert_eq!(
            state.is_authenticated(),
            state.token().is_some() && state.user().is_some()
        );
    }

    #[test]
    fn test_decode_claims() {
        let claims = decode_claims(&token_expiring_at(1_700_000_100)).unwrap();
        assert_eq!(claims.exp, Some(1_700_000_100.0));

        let claims = decode_claims(&token_with_payload(r#"{"sub":"1"}"#)).unwrap();
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn test_decode_claims_accepts_padding() {
        let header = "eyJhbGciOiJIUzI1NiJ9";
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"exp":12}"#);
        assert!(payload.ends_with("=="));
        let claims = decode_claims(&format!("{header}.{payload}.sig")).unwrap();
        assert_eq!(claims.exp, Some(12.0));
    }

    #[test]
    fn test_decode_claims_rejects_garbage() {
        assert_eq!(decode_claims("not-a-jwt"), Err(SessionError::MalformedToken));
        assert_eq!(decode_claims("a..c"), Err(SessionError::MalformedToken));
        assert!(matches!(
            decode_claims("a.!!!.c"),
            Err(SessionError::InvalidEncoding(_))
        ));
        let not_json = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode("hello");
        assert!(matches!(
            decode_claims(&format!("a.{not_json}.c")),
            Err(SessionError::InvalidClaims(_))
        ));
    }

    #[test]
    fn test_starts_loading() {
        let (store, _) = store_with(None, None);
        let state = store.state();
        assert!(state.loading);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_initialize_without_entries() {
        for (token, user) in [
            (None, None),
            (Some("a.b.c"), None),
            (None, Some(&hr_user())),
        ] {
            let (store, _) = store_with(token, user);
            store.initialize_at(now());
            let state = store.state();
            assert!(!state.loading);
            assert!(!state.is_authenticated());
            assert_consistent(&state);
        }
    }

    #[test]
    fn test_initialize_with_valid_token() {
        let token = token_expiring_at(1_700_003_600);
        let (store, storage) = store_with(Some(&token), Some(&hr_user()));
        store.initialize_at(now());

        let state = store.state();
        assert!(!state.loading);
        assert!(state.is_authenticated());
        assert_eq!(state.token(), Some(token.as_str()));
        assert_eq!(state.user(), Some(&hr_user()));
        assert_consistent(&state);
        assert_eq!(storage.len(), 2);
    }

    #[test]
    fn test_initialize_with_token_without_exp() {
        let token = token_with_payload(r#"{"sub":"1"}"#);
        let (store, _) = store_with(Some(&token), Some(&hr_user()));
        store.initialize_at(now());
        assert!(store.state().is_authenticated());
    }

    #[test]
    fn test_zero_exp_never_expires() {
        let claims = decode_claims(&token_expiring_at(0)).unwrap();
        assert_eq!(claims.exp, Some(0.0));
        assert!(!claims.is_expired_at(now()));

        let (store, storage) = store_with(Some(&token_expiring_at(0)), Some(&hr_user()));
        store.initialize_at(now());
        assert!(store.state().is_authenticated());
        assert_eq!(storage.len(), 2);
    }

    #[test]
    fn test_initialize_with_expired_token_clears_storage() {
        let token = token_expiring_at(1_699_999_999);
        let (store, storage) = store_with(Some(&token), Some(&hr_user()));
        store.initialize_at(now());

        let state = store.state();
        assert!(!state.loading);
        assert!(!state.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_initialize_with_malformed_token_is_silent_logout() {
        let (store, storage) = store_with(Some("garbage"), Some(&hr_user()));
        store.initialize_at(now());
        assert!(!store.state().is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_initialize_with_broken_user_record() {
        let token = token_expiring_at(1_700_003_600);
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, &token);
        storage.set(USER_KEY, "{not json");
        let store = SessionStore::new(storage.clone());
        store.initialize_at(now());
        assert!(!store.state().is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_initialize_runs_once() {
        let (store, storage) = store_with(None, None);
        store.initialize_at(now());

        storage.set(TOKEN_KEY, &token_expiring_at(1_700_003_600));
        storage.set(USER_KEY, &serde_json::to_string(&hr_user()).unwrap());
        store.initialize_at(now());

        assert!(!store.state().is_authenticated());
    }

    #[test]
    fn test_login_persists_both_entries() {
        let (store, storage) = store_with(None, None);
        store.initialize_at(now());

        let token = token_expiring_at(1_700_003_600);
        store.login(token.clone(), hr_user()).unwrap();

        let state = store.state();
        assert!(state.is_authenticated());
        assert_eq!(state.role(), Some(Role::Hr));
        assert_eq!(state.role().map(Role::default_route), Some(crate::route::Route::Hr));
        assert_eq!(storage.get(TOKEN_KEY), Some(token));
        let stored: User = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(stored, hr_user());
    }

    #[test]
    fn test_logout_then_reload() {
        let (store, storage) = store_with(None, None);
        store.initialize_at(now());
        store
            .login(token_expiring_at(1_700_003_600), hr_user())
            .unwrap();

        store.logout();
        assert!(!store.state().is_authenticated());
        assert_consistent(&store.state());
        assert!(storage.is_empty());

        let reloaded = SessionStore::new(storage.clone());
        reloaded.initialize_at(now());
        assert!(!reloaded.state().is_authenticated());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let (store, storage) = store_with(None, None);
        store.initialize_at(now());
        store.logout();
        store.logout();
        assert!(!store.state().is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_refresh_user() {
        let (store, storage) = store_with(None, None);
        store.initialize_at(now());
        store.refresh_user(hr_user());
        assert!(storage.is_empty());

        store
            .login(token_expiring_at(1_700_003_600), hr_user())
            .unwrap();
        let renamed = User {
            name: "Helen R.".to_string(),
            ..hr_user()
        };
        store.refresh_user(renamed.clone());
        assert_eq!(store.state().user(), Some(&renamed));
        assert!(storage.get(USER_KEY).unwrap().contains("Helen R."));
    }

    #[test]
    fn test_refresh_user_signals_new_profile() {
        let (store, _) = store_with(None, None);
        store.initialize_at(now());
        store
            .login(token_expiring_at(1_700_003_600), hr_user())
            .unwrap();

        let mut states = store.signal().to_stream();
        futures::executor::block_on(states.next()).unwrap();

        store.refresh_user(hr_user());
        let renamed = User {
            name: "Helen R.".to_string(),
            ..hr_user()
        };
        store.refresh_user(renamed.clone());

        let next = futures::executor::block_on(states.next()).unwrap();
        assert_eq!(next.user(), Some(&renamed));
    }

    #[test]
    fn test_signal_reports_initialized_state() {
        let token = token_expiring_at(1_700_003_600);
        let (store, _) = store_with(Some(&token), Some(&hr_user()));
        let mut states = store.signal().to_stream();

        let first = futures::executor::block_on(states.next()).unwrap();
        assert!(first.loading);

        store.initialize_at(now());
        let second = futures::executor::block_on(states.next()).unwrap();
        assert!(!second.loading);
        assert_eq!(second.role(), Some(Role::Hr));
    }
}
