//! Decides which directory entries participate in a build. The rules are
//! purely name-based: no filesystem access happens here, so the same
//! decision applies whether an entry turns out to be a file or a directory.

/// Names that are always kept even though the prefix rules would exclude
/// them. The posts directory is also kept but is handled separately since
/// its name is configurable.
pub const KEEP_FILES: &[&str] = &[".htaccess"];

/// Filters a list of entry names down to the ones that should be
/// traversed, rendered, or copied. `posts_dir` is the configured name of
/// the chronological-content directory (usually `_posts`); it survives the
/// underscore rule by literal name equality, not by prefix matching.
///
/// An entry is dropped when its first character is `.`, `_`, or `#`, or
/// when its last character is `~` (editor backup files), unless it is
/// exactly `posts_dir` or one of [`KEEP_FILES`]. The relative order of the
/// surviving entries is preserved, and filtering an already-filtered list
/// is a no-op.
pub fn filter_entries(mut entries: Vec<String>, posts_dir: &str) -> Vec<String> {
    entries.retain(|e| is_included(e, posts_dir));
    entries
}

fn is_included(name: &str, posts_dir: &str) -> bool {
    if name == posts_dir || KEEP_FILES.contains(&name) {
        return true;
    }
    let excluded_prefix = matches!(name.chars().next(), Some('.') | Some('_') | Some('#'));
    let excluded_suffix = name.ends_with('~');
    !(excluded_prefix || excluded_suffix)
}

#[cfg(test)]
mod test {
    use super::*;

    fn entries(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_excludes_hidden_special_and_backup_names() {
        let input = entries(&[
            "foo.md",
            "bar.md",
            "baz.md",
            "#baz.md#",
            ".baz.md",
            "foo.md~",
        ]);
        assert_eq!(
            entries(&["foo.md", "bar.md", "baz.md"]),
            filter_entries(input, "_posts"),
        );
    }

    #[test]
    fn test_keeps_special_case_names() {
        let input = entries(&[".htaccess", "_posts", "bla.bla"]);
        assert_eq!(input.clone(), filter_entries(input, "_posts"));
    }

    #[test]
    fn test_posts_dir_is_matched_literally() {
        // Only the configured name survives the underscore rule; other
        // `_`-prefixed names (including prefixes of the configured name)
        // are still dropped.
        let input = entries(&["_posts", "_post", "_drafts", "_postscript"]);
        assert_eq!(entries(&["_posts"]), filter_entries(input, "_posts"));

        let input = entries(&["_posts", "_articles"]);
        assert_eq!(entries(&["_articles"]), filter_entries(input, "_articles"));
    }

    #[test]
    fn test_idempotent_and_order_preserving() {
        let input = entries(&["z.md", ".hidden", "a.md", "_notes", "m.md"]);
        let once = filter_entries(input, "_posts");
        assert_eq!(entries(&["z.md", "a.md", "m.md"]), once);
        assert_eq!(once.clone(), filter_entries(once, "_posts"));
    }
}
