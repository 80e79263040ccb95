//! Request path helpers

/// Join a base path with a per-call path using exactly one `/` between them.
///
/// Leading slashes on `path` and trailing slashes on `base` are dropped, so
/// `join_path("foo", "/bar")` is `"foo/bar"`. An empty `path` yields the base.
pub fn join_path(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        return base.to_string();
    }

    format!("{}/{}", base, path)
}

/// Resolve the path forwarded to the transport for one request.
pub(crate) fn effective_path(base: Option<&str>, path: Option<&str>) -> Option<String> {
    match (base, path) {
        (Some(base), Some(path)) => Some(join_path(base, path)),
        (Some(base), None) => Some(base.trim_end_matches('/').to_string()),
        (None, path) => path.map(str::to_string),
    }
}
