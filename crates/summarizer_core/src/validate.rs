use once_cell::sync::Lazy;
use regex::Regex;

// Optional http(s) scheme, dotted host, 2-6 char final label, optional /path.
// IP hosts and ports are rejected; this is an approximation of URL syntax.
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})(/[/\w .-]*)?$")
        .expect("URL pattern compiles")
});

/// Returns whether `candidate` looks like a well-formed article URL.
///
/// Callers handle the empty string themselves: an empty input disables
/// submission but is never flagged as invalid.
pub fn validate_url(candidate: &str) -> bool {
    URL_PATTERN.is_match(candidate)
}
