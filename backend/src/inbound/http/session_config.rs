//! Session configuration parsing and validation.
//!
//! Centralises the environment-driven cookie session settings so they are
//! validated consistently and can be tested with a mocked environment.
//!
//! | Variable                  | Release build                 | Debug build                    |
//! |---------------------------|-------------------------------|--------------------------------|
//! | `SESSION_SECRET`          | required, at least 64 bytes   | at least 32 bytes; may be unset when ephemeral keys are allowed |
//! | `SESSION_COOKIE_SECURE`   | default `1`, invalid rejected | default `1`, invalid warned    |
//! | `SESSION_SAMESITE`        | default `Strict`              | default `Lax`                  |
//! | `SESSION_ALLOW_EPHEMERAL` | must not be enabled           | default enabled                |

mod fingerprint;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::{debug, warn};
use zeroize::Zeroizing;

pub use fingerprint::key_fingerprint;

const SECRET_ENV: &str = "SESSION_SECRET";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const RELEASE_SECRET_MIN_LEN: usize = 64;
/// `Key::derive_from` panics below this length.
const DEBUG_SECRET_MIN_LEN: usize = 32;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Tolerates defaults and warns about questionable toggles.
    Debug,
    /// Rejects anything that would weaken the session cookie.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }

    fn secret_min_len(self) -> usize {
        match self {
            Self::Debug => DEBUG_SECRET_MIN_LEN,
            Self::Release => RELEASE_SECRET_MIN_LEN,
        }
    }
}

/// Session settings derived from the environment.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("SESSION_SECRET too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use clinic_backend::inbound::http::session_config::{
///     session_settings_from_env, BuildMode,
/// };
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_SECRET" => Some("k".repeat(64)),
///     "SESSION_SAMESITE" => Some("Strict".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release).unwrap();
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = cookie_secure_from_env(env, mode)?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let key = session_key_from_env(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn cookie_secure_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(COOKIE_SECURE_ENV) else {
        debug!("SESSION_COOKIE_SECURE not set; defaulting to secure");
        return Ok(true);
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid SESSION_COOKIE_SECURE; defaulting to secure");
            Ok(true)
        }
        None => Err(SessionConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = env.string(SAMESITE_ENV) else {
        return Ok(default_same_site);
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("SESSION_SAMESITE=None with insecure cookies; browsers may reject them");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid SESSION_SAMESITE, using default");
            Ok(default_same_site)
        }
        _ => Err(SessionConfigError::InvalidEnv {
            name: SAMESITE_ENV,
            value,
            expected: SAMESITE_EXPECTED,
        }),
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, SessionConfigError> {
    let parsed = match env.string(ALLOW_EPHEMERAL_ENV) {
        None => return Ok(mode.is_debug()),
        Some(value) => match parse_bool(&value) {
            Some(flag) => flag,
            None if mode.is_debug() => {
                warn!(value = %value, "invalid SESSION_ALLOW_EPHEMERAL; keeping debug default");
                true
            }
            None => {
                return Err(SessionConfigError::InvalidEnv {
                    name: ALLOW_EPHEMERAL_ENV,
                    value,
                    expected: BOOL_EXPECTED,
                });
            }
        },
    };
    if parsed && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    Ok(parsed)
}

fn session_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let Some(secret) = env.string(SECRET_ENV).map(Zeroizing::new) else {
        if allow_ephemeral {
            warn!("SESSION_SECRET not set; using a temporary session key (dev only)");
            return Ok(Key::generate());
        }
        return Err(SessionConfigError::MissingEnv { name: SECRET_ENV });
    };

    let length = secret.len();
    let min_len = mode.secret_min_len();
    if length < min_len {
        return Err(SessionConfigError::SecretTooShort { length, min_len });
    }
    Ok(Key::derive_from(secret.as_bytes()))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
