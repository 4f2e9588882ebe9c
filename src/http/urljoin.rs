//! Relative URL resolution
//!
//! Joins an API base URL with a path fragment taken from a payload or built
//! by the client. The base is always treated as a directory, and a single
//! leading slash on the fragment does not make it root-relative.
//!
//! Dot segments are collapsed only while there is a named segment to pop, so
//! `..` segments that climb past the root are kept in the output verbatim:
//!
//! ```ignore
//! assert_eq!(resolve("http://h/v1", "../../../schemas")?, "http://h/../../schemas");
//! ```

use crate::error::{Error, Result};
use std::borrow::Cow;
use url::{Position, Url};

/// Resolve `fragment` against `base`.
///
/// Fails with [`Error::InvalidUrl`] when `base` is not an absolute URL.
pub fn resolve(base: &str, fragment: &str) -> Result<String> {
    let fragment = fragment.strip_prefix('/').unwrap_or(fragment);
    let base: Cow<'_, str> = if base.ends_with('/') {
        Cow::Borrowed(base)
    } else {
        Cow::Owned(format!("{}/", base))
    };

    let base_url = Url::parse(&base).map_err(|e| Error::invalid_url(&base, e))?;
    if base_url.cannot_be_a_base() {
        return Err(Error::invalid_url(
            &base,
            url::ParseError::RelativeUrlWithCannotBeABaseBase,
        ));
    }

    // Fragments carrying their own scheme replace the base entirely
    if let Ok(absolute) = Url::parse(fragment) {
        return Ok(absolute.to_string());
    }

    let (rest, anchor) = match fragment.split_once('#') {
        Some((rest, anchor)) => (rest, Some(anchor)),
        None => (fragment, None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };

    let prefix = &base_url[..Position::BeforePath];
    let mut joined = if path.is_empty() {
        base_url[..Position::AfterPath].to_string()
    } else if path.starts_with('/') {
        // Only reachable for "//..." fragments once the first slash is gone
        format!("{}{}", prefix, path)
    } else {
        format!("{}{}", prefix, merge_paths(base_url.path(), path))
    };

    match query {
        Some(query) => {
            joined.push('?');
            joined.push_str(query);
        }
        None if path.is_empty() => {
            if let Some(query) = base_url.query() {
                joined.push('?');
                joined.push_str(query);
            }
        }
        None => {}
    }

    if let Some(anchor) = anchor {
        joined.push('#');
        joined.push_str(anchor);
    }

    Ok(joined)
}

/// Merge a relative path onto the directory of `base_path` and collapse dot
/// segments. A `..` only consumes a preceding named segment; one that would
/// climb past the root stays in place.
fn merge_paths(base_path: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = base_path.split('/').collect();
    segments.pop();
    segments.extend(relative.split('/'));

    if let Some(last) = segments.last_mut() {
        if *last == "." {
            *last = "";
        }
    }
    segments.retain(|s| *s != ".");

    // The trailing segment is handled separately below
    while let Some(i) = (1..segments.len().saturating_sub(1))
        .find(|&i| segments[i] == ".." && !matches!(segments[i - 1], "" | ".."))
    {
        segments.drain(i - 1..=i);
    }

    // A trailing ".." follows the same rule and leaves a directory behind
    let n = segments.len();
    if n >= 2 && segments[n - 1] == ".." && !matches!(segments[n - 2], "" | "..") {
        segments.truncate(n - 2);
        segments.push("");
    }

    segments.join("/")
}
