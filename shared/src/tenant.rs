//! Commerce (tenant) resolution from request hosts
//!
//! Each commerce is served from its own subdomain of the root domain,
//! e.g. `pizzeria.carta.app`. The bare root domain and `www` belong to no
//! commerce.

/// Extract the commerce slug from `host` under `root_domain`.
///
/// Ports are ignored and matching is case-insensitive. Returns `None` for
/// the root domain itself, `www`, nested subdomains and foreign hosts.
pub fn commerce_from_host(host: &str, root_domain: &str) -> Option<String> {
    let host = host.split(':').next()?.trim().trim_end_matches('.');
    let host = host.to_ascii_lowercase();
    let root = root_domain.trim().trim_end_matches('.').to_ascii_lowercase();

    let sub = host.strip_suffix(&root)?.strip_suffix('.')?;
    if sub.is_empty() || sub == "www" || sub.contains('.') || !is_valid_slug(sub) {
        return None;
    }
    Some(sub.to_string())
}

/// Slugs are DNS labels: ASCII alphanumerics and inner hyphens
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 63
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
