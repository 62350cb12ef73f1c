use tracing::warn;

/// Parse a TTL token, honoring the optional `d`/`h`/`m` unit suffix
/// (case-insensitive). A bare number is taken as seconds. Returns `None` on
/// anything unparseable or out of `u32` range so callers can fall back
/// instead of failing the whole parse.
pub fn parse_ttl(token: &str) -> Option<u32> {
    let token = token.trim().to_lowercase();

    let (digits, multiplier) = if let Some(rest) = token.strip_suffix('d') {
        (rest, 86400)
    } else if let Some(rest) = token.strip_suffix('h') {
        (rest, 3600)
    } else if let Some(rest) = token.strip_suffix('m') {
        (rest, 60)
    } else {
        (token.as_str(), 1)
    };

    digits
        .parse::<u32>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
}

/// True when the token is a plain non-negative integer (a bare TTL field).
pub fn is_int(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Lowercase a hostname and reduce it to the characters the provider
/// accepts, trimming stray leading/trailing hyphens and dots. A duplicated
/// trailing origin suffix (`host.example.com.example.com`) is collapsed.
/// Hostnames that still fail the provider grammar are passed through with a
/// warning rather than rejected.
pub fn sanitize_hostname(hostname: &str, origin: &str) -> String {
    let lowered = hostname.to_lowercase();

    let mut sanitized: String = lowered
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
        .collect();

    sanitized = sanitized
        .trim_matches(|c| c == '-' || c == '.')
        .to_string();

    let origin = origin.trim_end_matches('.');
    if !origin.is_empty() {
        let doubled = format!(".{origin}.{origin}");
        if let Some(stem) = sanitized.strip_suffix(&doubled) {
            sanitized = format!("{stem}.{origin}");
        }
    }

    if !sanitized.is_empty() && !is_hostname_valid(&sanitized) {
        warn!("hostname {:?} does not match provider grammar", sanitized);
    }

    sanitized
}

/// Strip a single trailing dot from a record value.
pub fn sanitize_value(value: &str) -> &str {
    value.strip_suffix('.').unwrap_or(value)
}

/// Provider hostname grammar: lowercase labels of up to 63 alphanumeric
/// characters with inner hyphens, joined by dots, no trailing dot.
pub fn is_hostname_valid(hostname: &str) -> bool {
    if hostname.is_empty() || hostname.ends_with('.') {
        return false;
    }
    if hostname != hostname.to_lowercase() {
        return false;
    }

    hostname.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

/// Basic FQDN shape: at least two labels of `[A-Za-z0-9-]`, each at most 63
/// characters, with an alphabetic TLD-like final label of two or more
/// characters.
fn is_fqdn(value: &str) -> bool {
    let labels: Vec<&str> = value.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let well_formed = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    if !well_formed {
        return false;
    }
    let tld = labels[labels.len() - 1];
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Ensure a record value is a fully-qualified name, appending the origin
/// when it is not. The boolean reports whether the value already was an
/// FQDN; call sites use it to decide whether a record should be skipped
/// when qualification could not produce a valid name.
pub fn ensure_fqdn(value: &str, origin: &str) -> (String, bool) {
    let mut value = value.trim_end_matches('.').to_string();
    let origin = origin.trim_end_matches('.');

    if is_fqdn(&value) {
        return (value, true);
    }

    if !origin.is_empty() && !value.ends_with(origin) {
        value.push('.');
        value.push_str(origin);
    }
    value = value.trim_end_matches('.').to_string();

    (value, false)
}

/// True when the qualified value passes the basic FQDN shape check.
pub fn is_resolved_fqdn(value: &str) -> bool {
    is_fqdn(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ttl_units() {
        assert_eq!(parse_ttl("300"), Some(300));
        assert_eq!(parse_ttl("5m"), Some(300));
        assert_eq!(parse_ttl("2H"), Some(7200));
        assert_eq!(parse_ttl("1d"), Some(86400));
        assert_eq!(parse_ttl("bogus"), None);
        assert_eq!(parse_ttl(""), None);
    }

    #[test]
    fn test_parse_ttl_rejects_overflowing_values() {
        // 49711 days in seconds exceeds u32::MAX.
        assert_eq!(parse_ttl("49711d"), None);
        assert_eq!(parse_ttl("1193047h"), None);
        assert_eq!(parse_ttl("4294967295"), Some(u32::MAX));
    }

    #[test]
    fn test_is_int() {
        assert!(is_int("3600"));
        assert!(!is_int("IN"));
        assert!(!is_int("36h"));
        assert!(!is_int(""));
    }

    #[test]
    fn test_sanitize_hostname_strips_noise() {
        assert_eq!(sanitize_hostname("WWW.Example.COM.", ""), "www.example.com");
        assert_eq!(sanitize_hostname("-web01-.", ""), "web01");
        assert_eq!(sanitize_hostname("host!name", ""), "hostname");
        assert_eq!(sanitize_hostname("_sip._tcp", ""), "_sip._tcp");
    }

    #[test]
    fn test_sanitize_hostname_collapses_doubled_origin() {
        assert_eq!(
            sanitize_hostname("www.example.com.example.com", "example.com."),
            "www.example.com"
        );
    }

    #[test]
    fn test_sanitize_value() {
        assert_eq!(sanitize_value("ns1.example.com."), "ns1.example.com");
        assert_eq!(sanitize_value("ns1.example.com"), "ns1.example.com");
    }

    #[test]
    fn test_is_hostname_valid() {
        assert!(is_hostname_valid("www.example.com"));
        assert!(is_hostname_valid("a-b.example.com"));
        assert!(!is_hostname_valid("www.example.com."));
        assert!(!is_hostname_valid("WWW.example.com"));
        assert!(!is_hostname_valid("-bad.example.com"));
    }

    #[test]
    fn test_ensure_fqdn_passthrough() {
        let (value, was_fqdn) = ensure_fqdn("target.example.com.", "other.org");
        assert_eq!(value, "target.example.com");
        assert!(was_fqdn);
    }

    #[test]
    fn test_ensure_fqdn_appends_origin() {
        let (value, was_fqdn) = ensure_fqdn("web01", "example.com.");
        assert_eq!(value, "web01.example.com");
        assert!(!was_fqdn);
        assert!(is_resolved_fqdn(&value));
    }

    #[test]
    fn test_ensure_fqdn_does_not_double_origin() {
        let (value, was_fqdn) = ensure_fqdn("web_01.example.com", "example.com");
        assert_eq!(value, "web_01.example.com");
        assert!(!was_fqdn);
        // Underscore keeps this outside the FQDN grammar even after the check.
        assert!(!is_resolved_fqdn(&value));
    }
}
