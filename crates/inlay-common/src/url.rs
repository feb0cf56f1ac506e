//! URL resolution utilities.
//!
//! [§ 4.2.3 The base element](https://html.spec.whatwg.org/multipage/semantics.html#the-base-element)
//! [URL Standard](https://url.spec.whatwg.org/)

/// [§ 2.5 URLs](https://html.spec.whatwg.org/multipage/urls-and-fetching.html#resolving-urls)
///
/// Resolve a potentially relative script `src` against a base URL.
///
/// STEP 1: "If url is an absolute URL, return url."
///
/// STEP 2: "Otherwise, resolve url relative to base."
///
/// NOTE: This is a simplified implementation. Dot segments, query strings
/// and fragments on the base are not normalised.
#[must_use]
pub fn resolve_url(href: &str, base_url: Option<&str>) -> String {
    // STEP 1: "An absolute-URL string is a URL-scheme string, followed by
    // U+003A (:), followed by a scheme-specific part."
    if is_absolute(href) {
        return href.to_string();
    }

    // STEP 2: Resolve relative URL against base.
    let Some(base) = base_url else {
        return href.to_string();
    };

    if let Some(rest) = href.strip_prefix("//") {
        // Protocol-relative URL - take the scheme from base
        let scheme = base.split_once(':').map_or("https", |(scheme, _)| scheme);
        format!("{scheme}://{rest}")
    } else if href.starts_with('/') {
        // Absolute path - join with the origin of base
        base.find("://").map_or_else(
            || href.to_string(),
            |scheme_end| {
                let after_scheme = &base[scheme_end + 3..];
                after_scheme.find('/').map_or_else(
                    || format!("{base}{href}"),
                    |path_start| {
                        let origin = &base[..scheme_end + 3 + path_start];
                        format!("{origin}{href}")
                    },
                )
            },
        )
    } else {
        // Relative path - join with the directory of base
        let base_dir = match base.find("://") {
            // "https://example.com" has no path: the whole base is the directory
            Some(scheme_end) if !base[scheme_end + 3..].contains('/') => base,
            _ => base.rsplit_once('/').map_or(base, |(dir, _)| dir),
        };
        format!("{base_dir}/{href}")
    }
}

fn is_absolute(href: &str) -> bool {
    ["http://", "https://", "data:", "file:"]
        .iter()
        .any(|scheme| href.starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::resolve_url;

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            resolve_url("https://cdn.example.com/a.js", Some("https://example.com/")),
            "https://cdn.example.com/a.js"
        );
        assert_eq!(resolve_url("data:text/javascript,1", None), "data:text/javascript,1");
    }

    #[test]
    fn relative_without_base_is_unchanged() {
        assert_eq!(resolve_url("a.js", None), "a.js");
    }

    #[test]
    fn origin_relative_path() {
        assert_eq!(
            resolve_url("/static/a.js", Some("https://example.com/docs/page.html")),
            "https://example.com/static/a.js"
        );
    }

    #[test]
    fn directory_relative_path() {
        assert_eq!(
            resolve_url("a.js", Some("https://example.com/docs/page.html")),
            "https://example.com/docs/a.js"
        );
        assert_eq!(
            resolve_url("a.js", Some("https://example.com")),
            "https://example.com/a.js"
        );
    }

    #[test]
    fn protocol_relative() {
        assert_eq!(
            resolve_url("//cdn.example.com/a.js", Some("http://example.com/")),
            "http://cdn.example.com/a.js"
        );
    }
}
