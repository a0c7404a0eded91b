//! Title resolution for new items.

use lnf_core::enums::ItemStatus;

/// Characters of the description kept in a derived title.
pub const TITLE_MAX_CHARS: usize = 50;

const ELLIPSIS: &str = "...";

/// Resolve the stored title of a new item.
///
/// A non-blank `title` wins. Otherwise the first [`TITLE_MAX_CHARS`]
/// characters of the description are used, with `...` appended when cut.
/// With neither, the title falls back to `Lost Item` or `Found Item`.
#[must_use]
pub fn derive_title(title: Option<&str>, description: &str, status: ItemStatus) -> String {
    if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }

    let description = description.trim();
    if description.is_empty() {
        return match status {
            ItemStatus::Lost => "Lost Item".to_string(),
            _ => "Found Item".to_string(),
        };
    }

    let mut chars = description.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(ItemStatus::Lost, "Lost Item")]
    #[case(ItemStatus::Found, "Found Item")]
    #[case(ItemStatus::Claimed, "Found Item")]
    fn blank_everything_falls_back_by_status(#[case] status: ItemStatus, #[case] expected: &str) {
        assert_eq!(derive_title(Some("   "), "", status), expected);
        assert_eq!(derive_title(None, "  ", status), expected);
    }

    #[test]
    fn explicit_title_is_trimmed_and_kept() {
        assert_eq!(
            derive_title(Some("  Red scarf "), "long description", ItemStatus::Found),
            "Red scarf"
        );
    }

    #[test]
    fn long_description_is_cut_at_fifty_chars() {
        let title = derive_title(
            None,
            "Blue backpack found in library, has a water bottle attached",
            ItemStatus::Found,
        );
        assert_eq!(title, "Blue backpack found in library, has a water bottle...");
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 3);
    }

    #[test]
    fn exactly_fifty_chars_is_not_marked() {
        let description = "x".repeat(TITLE_MAX_CHARS);
        assert_eq!(derive_title(None, &description, ItemStatus::Lost), description);
    }

    #[test]
    fn short_description_is_used_whole() {
        assert_eq!(
            derive_title(None, "Silver ring", ItemStatus::Lost),
            "Silver ring"
        );
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let description = "é".repeat(60);
        let title = derive_title(None, &description, ItemStatus::Found);
        assert_eq!(title, format!("{}...", "é".repeat(50)));
    }
}
