//! Post slug derivation.
//!
//! A slug names the output file of a post (`posts/<slug>.html`) and is also the
//! target that `[[post:Title]]` references resolve to, so both paths go
//! through [`post_slug`].
//!
//! Collisions are not detected: two posts with the same slug overwrite each
//! other on disk, last writer wins.

use regex::Regex;
use std::sync::LazyLock;

/// Everything that is neither a word character nor a hyphen.
static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\-]").unwrap());

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 40;

/// Title slugs shorter than this fall back to the file stem.
const MIN_TITLE_SLUG_LEN: usize = 5;

// ============================================================================
// Slugification
// ============================================================================

/// Derive the slug of a post from its title, falling back to the file stem.
///
/// | title | stem | slug |
/// |-------|------|------|
/// | `My First Post!` | `first` | `my-first-post` |
/// | `Hi` | `2025-hello` | `2025-hello` |
pub fn post_slug(title: &str, stem: &str) -> String {
    let mut slug = sanitize_title(title);
    if slug.chars().count() < MIN_TITLE_SLUG_LEN {
        slug = sanitize_stem(stem);
    }
    truncate_chars(slug, MAX_SLUG_LEN)
}

/// Derive a slug from a title alone, with no stem fallback.
///
/// Used for cross references whose title is not in the title map.
pub fn title_slug(title: &str) -> String {
    truncate_chars(sanitize_title(title), MAX_SLUG_LEN)
}

/// File name of the rendered post for a slug.
pub fn post_file_name(slug: &str) -> String {
    format!("{slug}.html")
}

/// Lowercase, spaces become hyphens, non-word characters are dropped.
fn sanitize_title(title: &str) -> String {
    let lowered = title.to_lowercase().replace(' ', "-");
    RE_NON_WORD.replace_all(&lowered, "").into_owned()
}

/// Lowercase and drop non-word characters. Spaces are dropped, not hyphenated.
fn sanitize_stem(stem: &str) -> String {
    RE_NON_WORD
        .replace_all(&stem.to_lowercase(), "")
        .into_owned()
}

fn truncate_chars(mut s: String, max_chars: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max_chars) {
        s.truncate(idx);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_slug_from_title() {
        assert_eq!(post_slug("My First Post!", "first"), "my-first-post");
    }

    #[test]
    fn test_post_slug_strips_punctuation() {
        assert_eq!(
            post_slug("What's (really) going on?", "x"),
            "whats-really-going-on"
        );
    }

    #[test]
    fn test_post_slug_is_idempotent() {
        let title = "Notes on Tufte: Margins & Sidenotes";
        let first = post_slug(title, "notes");
        let second = post_slug(title, "notes");
        assert_eq!(first, second);
        assert_eq!(first, "notes-on-tufte-margins--sidenotes");
    }

    #[test]
    fn test_post_slug_short_title_uses_stem() {
        assert_eq!(post_slug("Hi", "2025-hello"), "2025-hello");
        // Four characters is still too short.
        assert_eq!(post_slug("A B!", "My Stem"), "mystem");
    }

    #[test]
    fn test_post_slug_five_chars_keeps_title() {
        assert_eq!(post_slug("Hello", "stem"), "hello");
    }

    #[test]
    fn test_post_slug_truncates_to_forty_chars() {
        let title = "a very long title that keeps going well past the limit";
        let slug = post_slug(title, "stem");
        assert_eq!(slug.chars().count(), MAX_SLUG_LEN);
        assert_eq!(slug, "a-very-long-title-that-keeps-going-well-");
    }

    #[test]
    fn test_post_slug_keeps_unicode_letters() {
        assert_eq!(post_slug("Smörgåsbord för alla", "x"), "smörgåsbord-för-alla");
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("åäöåäö".to_string(), 3), "åäö");
        assert_eq!(truncate_chars("abc".to_string(), 10), "abc");
    }

    #[test]
    fn test_title_slug_has_no_stem_fallback() {
        assert_eq!(title_slug("Hi"), "hi");
        assert_eq!(title_slug("!!"), "");
    }

    #[test]
    fn test_post_file_name() {
        assert_eq!(post_file_name("hello-world"), "hello-world.html");
    }
}
