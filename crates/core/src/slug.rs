//! Slug utilities shared by every layer that builds or reads location paths.

/// Root every canonical slug hangs off.
pub const CANONICAL_ROOT: &str = "/foster-agency";

/// Words kept lowercase when turning a slug back into a title.
const MINOR_WORDS: [&str; 4] = ["and", "of", "in", "the"];

/// Turn arbitrary text into a URL path segment.
///
/// Lowercases and trims the input, drops everything that is not an ASCII
/// letter, digit, whitespace, underscore or hyphen, then collapses runs of
/// whitespace, underscores and hyphens into a single `-`. Leading and
/// trailing hyphens are removed. The function is total and idempotent.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for ch in lowered.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(ch);
        } else if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = true;
        }
    }

    out
}

/// Join path segments under the canonical root.
pub fn canonical_path<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut path = format!("{CANONICAL_ROOT}/");
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            path.push('/');
        }
        path.push_str(segment.as_ref());
    }
    path
}

/// Make sure a user-supplied path starts with `/foster-agency/`.
///
/// `london`, `/london` and `foster-agency/london` all become
/// `/foster-agency/london`. Trailing slashes are dropped.
pub fn normalize_canonical_slug(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    let relative = trimmed.trim_start_matches('/');
    let root = CANONICAL_ROOT.trim_start_matches('/');

    if relative == root {
        return format!("{CANONICAL_ROOT}/");
    }
    match relative.strip_prefix(root).and_then(|rest| rest.strip_prefix('/')) {
        Some(rest) => format!("{CANONICAL_ROOT}/{rest}"),
        None => format!("{CANONICAL_ROOT}/{relative}"),
    }
}

/// Best-effort display name for a slug segment, e.g.
/// `redcar-and-cleveland` -> `Redcar and Cleveland`.
pub fn title_from_slug(segment: &str) -> String {
    segment
        .split('-')
        .filter(|word| !word.is_empty())
        .enumerate()
        .map(|(i, word)| {
            if i > 0 && MINOR_WORDS.contains(&word) {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic_names() {
        assert_eq!(slugify("England"), "england");
        assert_eq!(slugify("Redcar and Cleveland"), "redcar-and-cleveland");
        assert_eq!(slugify("  Bath & North East Somerset "), "bath-north-east-somerset");
        assert_eq!(slugify("St. Helens"), "st-helens");
        assert_eq!(slugify("snake_case--name"), "snake-case-name");
    }

    #[test]
    fn slugify_is_total() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!???"), "");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("Ynys Môn"), "ynys-mn");
        assert_eq!(slugify("東京"), "");
    }

    #[test]
    fn slugify_is_idempotent() {
        let inputs = [
            "England",
            "  Redcar   and Cleveland  ",
            "a.b - c__d",
            "Ynys Môn",
            "-leading and trailing-",
            "",
            "!!",
        ];
        for input in inputs {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn canonical_path_joins_segments() {
        assert_eq!(
            canonical_path(["england", "greater-london", "london"]),
            "/foster-agency/england/greater-london/london"
        );
        assert_eq!(canonical_path(["england"]), "/foster-agency/england");
    }

    #[test]
    fn normalize_adds_root_once() {
        assert_eq!(normalize_canonical_slug("london"), "/foster-agency/london");
        assert_eq!(normalize_canonical_slug("/england/"), "/foster-agency/england");
        assert_eq!(
            normalize_canonical_slug("foster-agency/england/kent"),
            "/foster-agency/england/kent"
        );
        assert_eq!(
            normalize_canonical_slug("/foster-agency/england/kent"),
            "/foster-agency/england/kent"
        );
        assert_eq!(
            normalize_canonical_slug("/foster-agency-reviews"),
            "/foster-agency/foster-agency-reviews"
        );
    }

    #[test]
    fn titles_from_slugs() {
        assert_eq!(title_from_slug("redcar-and-cleveland"), "Redcar and Cleveland");
        assert_eq!(title_from_slug("isle-of-wight"), "Isle of Wight");
        assert_eq!(title_from_slug("the-wirral"), "The Wirral");
        assert_eq!(title_from_slug(""), "");
    }
}
