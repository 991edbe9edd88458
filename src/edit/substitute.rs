//! Literal search-and-replace over file content.

/// Result of substituting every occurrence of a search string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// The search text does not occur (an empty search text never occurs).
    NotFound,
    /// Every occurrence was replaced but the text is byte-identical.
    Unchanged { occurrences: usize },
    /// The new content and how many occurrences were replaced.
    Changed { content: String, occurrences: usize },
}

/// Replace all non-overlapping occurrences of `search` with `replacement`,
/// scanning left to right.
pub fn substitute_all(content: &str, search: &str, replacement: &str) -> Substitution {
    if search.is_empty() {
        return Substitution::NotFound;
    }

    let occurrences = content.matches(search).count();
    if occurrences == 0 {
        return Substitution::NotFound;
    }

    let replaced = content.replace(search, replacement);
    if replaced == content {
        Substitution::Unchanged { occurrences }
    } else {
        Substitution::Changed {
            content: replaced,
            occurrences,
        }
    }
}
