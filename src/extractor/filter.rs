/// Hosts that never make a gem: the forum itself and archive mirrors.
pub const EXCLUDED_DOMAINS: [&str; 4] = [
    "news.ycombinator.com",
    "archive.ph",
    "archive.md",
    "archive.is",
];

/// Network location of a URL exactly as written: everything between `://`
/// and the first `/`, `?` or `#`. Case, port and userinfo are kept.
pub fn base_domain(url: &str) -> String {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or("");
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    rest[..end].to_string()
}

/// Exact match against [`EXCLUDED_DOMAINS`]; subdomains are not excluded.
pub fn is_excluded(domain: &str) -> bool {
    EXCLUDED_DOMAINS.contains(&domain)
}
