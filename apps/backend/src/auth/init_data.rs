//! Telegram Mini App `initData` verification.
//!
//! Telegram signs the launch parameters it hands to a Mini App:
//!
//! ```text
//! secret_key = HMAC_SHA256(key = "WebAppData", msg = bot_token)
//! hash       = hex(HMAC_SHA256(key = secret_key, msg = data_check_string))
//! ```
//!
//! `data_check_string` is every field except `hash`, sorted by key, rendered
//! as `key=value` and joined with `\n`. A payload is accepted only if the
//! hash matches and `auth_date` is at most [`MAX_AUTH_AGE_SECS`] old.
//!
//! Everything here is pure: no I/O and no shared state.

use std::collections::BTreeMap;
use std::fmt;

use hmac::{Hmac, Mac};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;
use sha2::Sha256;
use thiserror::Error;
use time::OffsetDateTime;

use super::identity::{AuthSource, TelegramIdentity};

type HmacSha256 = Hmac<Sha256>;

const WEB_APP_DATA_KEY: &[u8] = b"WebAppData";
const HASH_FIELD: &str = "hash";

/// Everything but RFC 3986 unreserved characters, as Telegram clients encode.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Oldest accepted `auth_date`, in seconds. Exactly this old still passes.
pub const MAX_AUTH_AGE_SECS: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InitDataError {
    #[error("init data is missing")]
    MissingHeader,
    #[error("init data is malformed")]
    MalformedPayload,
    #[error("init data signature does not match")]
    SignatureMismatch,
    #[error("init data auth_date is outside the accepted window")]
    StaleAuthData,
    #[error("init data carries no usable user")]
    MissingUserIdentity,
}

impl InitDataError {
    /// Stable snake_case reason for logs.
    pub const fn reason(&self) -> &'static str {
        match self {
            InitDataError::MissingHeader => "missing_header",
            InitDataError::MalformedPayload => "malformed_payload",
            InitDataError::SignatureMismatch => "signature_mismatch",
            InitDataError::StaleAuthData => "stale_auth_data",
            InitDataError::MissingUserIdentity => "missing_user_identity",
        }
    }
}

/// Decoded `initData` fields, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitData {
    fields: BTreeMap<String, String>,
}

fn decode_component(raw: &str) -> Result<String, InitDataError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| InitDataError::MalformedPayload)
}

impl InitData {
    /// Parse a URL-encoded query string. When a key repeats, the last value wins.
    pub fn parse(raw: &str) -> Result<Self, InitDataError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(InitDataError::MissingHeader);
        }

        let mut fields = BTreeMap::new();
        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or(InitDataError::MalformedPayload)?;
            fields.insert(decode_component(key)?, decode_component(value)?);
        }

        Ok(Self { fields })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn hash(&self) -> Option<&str> {
        self.get(HASH_FIELD)
    }

    /// `auth_date` as Unix seconds. Missing or non-integer is malformed.
    pub fn auth_date(&self) -> Result<i64, InitDataError> {
        self.get("auth_date")
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or(InitDataError::MalformedPayload)
    }

    pub fn data_check_string(&self) -> String {
        self.fields
            .iter()
            .filter(|(k, _)| k.as_str() != HASH_FIELD)
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn identity(&self) -> Result<TelegramIdentity, InitDataError> {
        let raw_user = self
            .get("user")
            .ok_or(InitDataError::MissingUserIdentity)?;
        let user: Value =
            serde_json::from_str(raw_user).map_err(|_| InitDataError::MalformedPayload)?;

        let telegram_id = user
            .get("id")
            .and_then(Value::as_i64)
            .filter(|id| *id > 0)
            .ok_or(InitDataError::MissingUserIdentity)?;
        let text = |field: &str| user.get(field).and_then(Value::as_str).map(str::to_owned);

        Ok(TelegramIdentity {
            telegram_id,
            username: text("username"),
            first_name: text("first_name"),
            last_name: text("last_name"),
            language_code: text("language_code"),
            is_premium: user
                .get("is_premium")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            source: AuthSource::Telegram,
        })
    }
}

#[allow(clippy::expect_used)]
fn hmac_sha256(key: &[u8]) -> HmacSha256 {
    HmacSha256::new_from_slice(key).expect("HMAC can take key of any size")
}

/// `HMAC_SHA256(key = "WebAppData", msg = bot_token)`
pub fn secret_key(bot_token: &str) -> [u8; 32] {
    let mut mac = hmac_sha256(WEB_APP_DATA_KEY);
    mac.update(bot_token.as_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Lowercase hex signature of a data-check string, as Telegram computes it.
pub fn sign(data_check_string: &str, bot_token: &str) -> String {
    let mut mac = hmac_sha256(&secret_key(bot_token));
    mac.update(data_check_string.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn encode_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    pairs
        .into_iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, COMPONENT),
                utf8_percent_encode(v, COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Build a signed, URL-encoded `initData` string the way the Telegram client
/// does. Keys must be distinct and must not include `hash`.
pub fn encode_signed(fields: &[(&str, &str)], bot_token: &str) -> String {
    let mut sorted = fields.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let dcs = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("\n");
    let hash = sign(&dcs, bot_token);

    encode_pairs(
        fields
            .iter()
            .copied()
            .chain(std::iter::once((HASH_FIELD, hash.as_str()))),
    )
}

/// Verifies `initData` against one bot token.
#[derive(Clone)]
pub struct InitDataVerifier {
    secret: [u8; 32],
}

impl fmt::Debug for InitDataVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InitDataVerifier").finish_non_exhaustive()
    }
}

impl InitDataVerifier {
    pub fn new(bot_token: &str) -> Self {
        Self {
            secret: secret_key(bot_token),
        }
    }

    /// Verify against the current wall-clock time.
    pub fn verify(&self, raw: &str) -> Result<TelegramIdentity, InitDataError> {
        self.verify_at(raw, OffsetDateTime::now_utc().unix_timestamp())
    }

    /// Parse, check the signature, check freshness relative to `now_unix`,
    /// then decode the user. The first failing step decides the error.
    pub fn verify_at(&self, raw: &str, now_unix: i64) -> Result<TelegramIdentity, InitDataError> {
        let data = InitData::parse(raw)?;
        self.check_signature(&data)?;

        let auth_date = data.auth_date()?;
        match now_unix.checked_sub(auth_date) {
            Some(age) if (0..=MAX_AUTH_AGE_SECS).contains(&age) => {}
            _ => return Err(InitDataError::StaleAuthData),
        }

        data.identity()
    }

    fn check_signature(&self, data: &InitData) -> Result<(), InitDataError> {
        let received = data
            .hash()
            .and_then(|h| hex::decode(h).ok())
            .ok_or(InitDataError::SignatureMismatch)?;

        let mut mac = hmac_sha256(&self.secret);
        mac.update(data.data_check_string().as_bytes());
        // constant-time
        mac.verify_slice(&received)
            .map_err(|_| InitDataError::SignatureMismatch)
    }
}
