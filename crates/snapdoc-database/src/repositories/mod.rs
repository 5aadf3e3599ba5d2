//! Repository implementations for the Snapdoc entities.

pub mod document;
pub mod folder;

pub use document::DocumentRepository;
pub use folder::FolderRepository;

/// Build a `LIKE` pattern that matches `query` as a literal substring.
///
/// SQLite's `LIKE` is case-insensitive for ASCII, which gives search its
/// case folding; wildcards in the query are escaped so they match
/// literally (paired with `ESCAPE '\'` in the queries).
pub(crate) fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("tax"), "%tax%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
