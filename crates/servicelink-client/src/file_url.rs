//! Asset path resolution.

/// Turn a server-relative asset path into an absolute URL.
///
/// - `http://` / `https://` input is returned unchanged
/// - `/`-prefixed input gets `origin` prepended (no doubled slash)
/// - any other non-empty input is returned unchanged
/// - empty or absent input yields `""`
pub fn resolve_file_url(origin: &str, path: Option<&str>) -> String {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return String::new();
    };

    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    if path.starts_with('/') {
        return format!("{}{}", origin.trim_end_matches('/'), path);
    }

    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "http://localhost:5500";

    #[test]
    fn test_absolute_urls_unchanged() {
        for url in ["http://cdn.example.com/a.png", "https://cdn.example.com/a.png"] {
            assert_eq!(resolve_file_url(ORIGIN, Some(url)), url);
        }
    }

    #[test]
    fn test_root_relative_prefixed_once() {
        let resolved = resolve_file_url(ORIGIN, Some("/uploads/p.png"));
        assert_eq!(resolved, "http://localhost:5500/uploads/p.png");
        // Resolving the result again leaves it alone.
        assert_eq!(resolve_file_url(ORIGIN, Some(&resolved)), resolved);
    }

    #[test]
    fn test_origin_trailing_slash() {
        assert_eq!(
            resolve_file_url("http://files/", Some("/x.png")),
            "http://files/x.png"
        );
    }

    #[test]
    fn test_empty_and_missing() {
        assert_eq!(resolve_file_url(ORIGIN, None), "");
        assert_eq!(resolve_file_url(ORIGIN, Some("")), "");
    }

    #[test]
    fn test_bare_relative_unchanged() {
        assert_eq!(resolve_file_url(ORIGIN, Some("uploads/p.png")), "uploads/p.png");
    }
}
