//! Resource reference resolution.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! Image references in a snapshot are usually already absolute (a layout
//! engine reports resolved `currentSrc` values), but hand-written snapshots
//! and `file:` documents carry relative paths. This is a small subset of the
//! URL parser: enough to join a reference onto a base.

/// Schemes treated as already-absolute references.
const ABSOLUTE_SCHEMES: [&str; 4] = ["http://", "https://", "data:", "file:"];

/// Whether `reference` already names a resource without needing a base.
#[must_use]
pub fn is_absolute(reference: &str) -> bool {
    ABSOLUTE_SCHEMES
        .iter()
        .any(|scheme| {
            reference
                .get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        })
}

/// Resolve `reference` against `base`.
///
/// [§ 4.4 URL parsing](https://url.spec.whatwg.org/#url-parsing)
///
/// STEP 1: "If url is an absolute URL, return url."
///
/// STEP 2: Scheme-relative (`//host/path`) references take the base scheme.
///
/// STEP 3: Path-absolute (`/path`) references replace the base path.
///
/// STEP 4: Path-relative references replace the last base segment, then
/// `.` and `..` segments are removed.
///
/// Without a base the reference is returned unchanged.
#[must_use]
pub fn resolve_url(reference: &str, base: Option<&str>) -> String {
    // STEP 1
    if is_absolute(reference) {
        return reference.to_string();
    }
    let Some(base) = base else {
        return reference.to_string();
    };

    // STEP 2
    if let Some(rest) = reference.strip_prefix("//") {
        let scheme = base.split_once("://").map_or("https", |(scheme, _)| scheme);
        return format!("{scheme}://{rest}");
    }

    let (origin, base_path) = split_origin(base);

    // STEP 3
    if reference.starts_with('/') {
        return format!("{origin}{}", normalize_path(reference));
    }

    // STEP 4
    let mut joined = match base_path.rsplit_once('/') {
        Some((directory, _)) => format!("{directory}/{reference}"),
        None => reference.to_string(),
    };
    // Below an origin every path is rooted.
    if !origin.is_empty() && !joined.starts_with('/') {
        joined.insert(0, '/');
    }
    format!("{origin}{}", normalize_path(&joined))
}

/// Split `scheme://host` from the path of an absolute base.
fn split_origin(base: &str) -> (&str, &str) {
    let Some(scheme_end) = base.find("://") else {
        // Plain filesystem path: no origin, the whole thing is the path.
        return ("", base);
    };
    let after_scheme = scheme_end + 3;
    match base[after_scheme..].find('/') {
        Some(path_start) => base.split_at(after_scheme + path_start),
        None => (base, ""),
    }
}

/// [§ 4.4 path state](https://url.spec.whatwg.org/#path-state)
///
/// Drop `.` segments and let `..` pop the previous segment. A relative
/// path keeps leading `..` segments, since they name directories outside
/// the base.
fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." if !absolute && segments.last().is_none_or(|last| *last == "..") => {
                segments.push("..");
            }
            ".." => {
                let _ = segments.pop();
            }
            other => segments.push(other),
        }
    }
    let trailing = path.ends_with('/') && !segments.is_empty();
    let mut joined = segments.join("/");
    if trailing {
        joined.push('/');
    }
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_path;

    #[test]
    fn test_normalize_path_dot_segments() {
        assert_eq!(normalize_path("/a/./b/../c"), "/a/c");
        assert_eq!(normalize_path("/../x"), "/x");
        assert_eq!(normalize_path("a/b/"), "a/b/");
    }
}
