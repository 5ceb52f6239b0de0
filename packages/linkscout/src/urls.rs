//! URL utilities: root-domain extraction, normalization, validation.
//!
//! All functions here are pure and deterministic. `normalize_url` exists
//! only for equality comparison (self-link exclusion) and must never be
//! dereferenced.

use url::Url;

/// Two-part public suffixes that keep three labels in the root domain.
///
/// A fixed enumerated list, not the full public-suffix list. Hosts under
/// suffixes outside this list get the two-label root.
const TWO_PART_TLDS: &[&str] = &[
    "co.uk", "org.uk", "ac.uk", "gov.uk", "me.uk", "co.jp", "ne.jp", "or.jp", "com.au", "net.au",
    "org.au", "co.nz", "org.nz", "co.za", "com.br", "com.mx", "com.ar", "co.in", "co.kr",
    "com.sg", "com.hk", "com.tw", "com.cn",
];

/// Extract the root domain from a URL: host without `www.`, subdomains
/// stripped down to the registrable domain.
///
/// `https://blog.example.com/post` → `example.com`,
/// `https://sub.deep.example.co.uk/page` → `example.co.uk`.
/// Inputs the `url` crate cannot parse a host out of are returned
/// unchanged, lowercased.
pub fn extract_domain(url: &str) -> String {
    let host = match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_ascii_lowercase(),
            None => return url.to_ascii_lowercase(),
        },
        Err(_) => return url.to_ascii_lowercase(),
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);
    root_domain(host)
}

fn root_domain(host: &str) -> String {
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() <= 2 {
        return host.to_string();
    }

    let last_two = labels[labels.len() - 2..].join(".");
    let keep = if TWO_PART_TLDS.contains(&last_two.as_str()) {
        3
    } else {
        2
    };

    if labels.len() <= keep {
        host.to_string()
    } else {
        labels[labels.len() - keep..].join(".")
    }
}

/// Normalize a URL for equality comparison.
///
/// Lowercases, forces the scheme to `https`, strips a leading `www.`,
/// strips the trailing `/` from the path, drops the fragment, keeps the
/// query string. Idempotent.
pub fn normalize_url(url: &str) -> String {
    let lowered = url.to_ascii_lowercase();

    let parsed = match Url::parse(&lowered) {
        Ok(parsed) => parsed,
        Err(_) => return lowered,
    };

    let Some(host) = parsed.host_str() else {
        return lowered;
    };
    let host = host.strip_prefix("www.").unwrap_or(host);

    let mut normalized = String::from("https://");
    normalized.push_str(host);
    if let Some(port) = parsed.port() {
        normalized.push(':');
        normalized.push_str(&port.to_string());
    }
    normalized.push_str(parsed.path().trim_end_matches('/'));
    if let Some(query) = parsed.query() {
        normalized.push('?');
        normalized.push_str(query);
    }

    normalized
}

/// Validate that a string is an HTTP(S) URL with a dotted host.
pub fn validate_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed
                    .host_str()
                    .is_some_and(|host| !host.is_empty() && host.contains('.'))
        }
        Err(_) => false,
    }
}

/// Collapse whitespace runs into single spaces and trim the ends.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
