//! Route template normalization and joining.

/// Strip exactly one leading and one trailing slash. Empty stays empty.
pub fn normalize(path: &str) -> &str {
    let trimmed = path.trim();
    let trimmed = trimmed.strip_prefix('/').unwrap_or(trimmed);
    trimmed.strip_suffix('/').unwrap_or(trimmed)
}

/// Join a normalized base path and member path into a route template:
/// leading slash, no trailing slash, `"/"` for root.
pub fn join(base: &str, rel: &str) -> String {
    match (base.is_empty(), rel.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{rel}"),
        (false, true) => format!("/{base}"),
        (false, false) => format!("/{base}/{rel}"),
    }
}
