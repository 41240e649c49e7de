//! Resolution of a base URL and a resource-relative path into the full URL
//! used for a single dispatch.

/// Join `base_url` and `path` with exactly one separating slash.
///
/// Strips at most one trailing `/` from `base_url` and at most one leading
/// `/` from `path`, logging a warning for each; both forms are accepted so
/// callers don't have to agree on who owns the separator.
pub fn resolve(base_url: &str, path: &str) -> String {
    let path = match path.strip_prefix('/') {
        Some(stripped) => {
            tracing::warn!(path, "request path should not start with '/' (removed)");
            stripped
        }
        None => path,
    };
    let base_url = match base_url.strip_suffix('/') {
        Some(stripped) => {
            tracing::warn!(base_url, "base URL should not end with '/' (removed)");
            stripped
        }
        None => base_url,
    };
    format!("{base_url}/{path}")
}
