//! Secret redaction for diagnostic output.
//!
//! Gate diagnostics must never leak a candidate secret. Digests are already
//! client-visible configuration, but log lines still carry only a short
//! preview so a pasted log is not a copy-paste source for config values.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// The replacement text for redacted secrets.
const REDACTED: &str = "[REDACTED]";

/// Patterns that match password-shaped values in diagnostic strings.
static SECRET_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // password/secret in key=value or key: value shapes
        Regex::new(r#"(?i)(password|passwd|pwd|secret)['"]?\s*[:=]\s*['"]?([^\s'"]+)"#)
            .expect("static redaction pattern compiles"),
    ]
});

/// Scrub password-shaped values from a diagnostic string.
///
/// Returns the input unchanged (borrowed) when nothing matches.
#[must_use]
pub fn redact(input: &str) -> Cow<'_, str> {
    let mut output = Cow::Borrowed(input);
    for pattern in SECRET_PATTERNS.iter() {
        if pattern.is_match(&output) {
            let replaced = pattern
                .replace_all(&output, format!("$1={REDACTED}"))
                .into_owned();
            output = Cow::Owned(replaced);
        }
    }
    output
}

/// Short preview of a digest for log lines: the first eight characters.
#[must_use]
pub fn digest_preview(digest: &str) -> String {
    let head: String = digest.chars().take(8).collect();
    format!("{head}..")
}
