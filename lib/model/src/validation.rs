use regex::Regex;
use std::sync::LazyLock;

// Matches http://, https://, ftp:// and ftps:// URLs with a dotted domain,
// `localhost` or a dotted-quad IPv4 host, an optional port and an optional
// path or query. Case-insensitive.
#[allow(clippy::expect_used, reason = "the pattern is a literal")]
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:http|ftp)s?://(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)|localhost|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})(?::\d+)?(?:/?|[/?]\S+)$",
    )
    .expect("hard-coded URL pattern must compile")
});

/// Checks whether `s` is a usable query argument: non-empty and containing at
/// least one non-whitespace character.
pub fn is_valid_string(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Checks whether `s` is an absolute URL.
///
/// Accepts the `http`, `https`, `ftp` and `ftps` schemes followed by a dotted
/// domain name, `localhost` or an IPv4 address, an optional port and an
/// optional path or query. Never panics, whatever the input.
pub fn is_url(s: &str) -> bool {
    URL_PATTERN.is_match(s)
}
