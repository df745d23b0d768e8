use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns used for redaction. All are vetted literals.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Telegram bot token: `<bot id>:<secret>`
    pub fn bot_token() -> &'static Regex {
        static BOT_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b\d{5,12}:[A-Za-z0-9_-]{20,}").unwrap()
        });
        &BOT_TOKEN_REGEX
    }

    /// Phone numbers: optional `+`, at least ten digits/separators
    pub fn phone() -> &'static Regex {
        static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\+?\d[\d\s()-]{8,}\d").unwrap()
        });
        &PHONE_REGEX
    }

    /// Opaque token candidates: hex, base64 or URL-safe base64 runs (>=20 chars)
    pub fn opaque_token() -> &'static Regex {
        static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"[A-Za-z0-9_+/-]{20,}={0,2}").unwrap()
        });
        &TOKEN_REGEX
    }
}

fn looks_like_token(candidate: &str) -> bool {
    candidate.chars().any(|c| c.is_ascii_digit())
        && candidate.chars().any(|c| c.is_ascii_alphabetic())
}

/// Masks secrets and personal data in a free-form string.
///
/// Bot tokens go first so their numeric prefix is not taken for a phone,
/// and hex runs are handled before phones for the same reason.
/// Token candidates made of letters only (identifiers such as index names)
/// are left intact.
pub fn redact(input: &str) -> String {
    let out = PiiRegexRegistry::bot_token().replace_all(input, "[REDACTED_BOT_TOKEN]");
    let out = PiiRegexRegistry::opaque_token().replace_all(&out, |caps: &regex::Captures| {
        let m = &caps[0];
        if looks_like_token(m) {
            "[REDACTED_TOKEN]".to_string()
        } else {
            m.to_string()
        }
    });
    PiiRegexRegistry::phone()
        .replace_all(&out, "[REDACTED_PHONE]")
        .into_owned()
}

/// Redacts the wrapped string when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
