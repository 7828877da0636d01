//! Couplet segmentation for lyrics pagination.
//!
//! Lyrics are paged by couplet, a block of lines separated from the next by
//! one blank line. Empty lyrics still hold a single empty couplet, so page 1
//! of an empty song is an empty string rather than an error.

use pagination::{PageError, PageRequest};

/// Separator between consecutive couplets.
pub const COUPLET_SEPARATOR: &str = "\n\n";

/// Return the couplets covered by `page`, rejoined with [`COUPLET_SEPARATOR`].
///
/// # Errors
/// Returns [`PageError::OutOfRange`] when the page starts after the last
/// couplet.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
/// use songbook::domain::lyrics::page_of_couplets;
///
/// let page = PageRequest::new(2, 1).expect("valid page");
/// assert_eq!(page_of_couplets("A\n\nB\n\nC", page).as_deref(), Ok("B"));
/// ```
pub fn page_of_couplets(text: &str, page: PageRequest) -> Result<String, PageError> {
    let couplets: Vec<&str> = text.split(COUPLET_SEPARATOR).collect();
    let window = page.window(couplets.len())?;
    Ok(couplets
        .get(window)
        .map(|selected| selected.join(COUPLET_SEPARATOR))
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const THREE_COUPLETS: &str = "A\n\nB\n\nC";

    fn page(page: i64, limit: i64) -> PageRequest {
        PageRequest::new(page, limit).expect("valid page")
    }

    #[rstest]
    #[case(1, 1, "A")]
    #[case(2, 1, "B")]
    #[case(1, 2, "A\n\nB")]
    #[case(2, 2, "C")]
    #[case(1, 10, THREE_COUPLETS)]
    fn selects_contiguous_couplets(
        #[case] number: i64,
        #[case] limit: i64,
        #[case] expected: &str,
    ) {
        let selected = page_of_couplets(THREE_COUPLETS, page(number, limit)).expect("page exists");
        assert_eq!(selected, expected);
    }

    #[rstest]
    #[case(3, 2)]
    #[case(4, 1)]
    fn rejects_pages_past_last_couplet(#[case] number: i64, #[case] limit: i64) {
        let error = page_of_couplets(THREE_COUPLETS, page(number, limit))
            .expect_err("page is out of range");
        assert!(matches!(error, PageError::OutOfRange { total: 3, .. }));
    }

    #[rstest]
    fn empty_lyrics_hold_one_empty_couplet() {
        assert_eq!(page_of_couplets("", page(1, 10)).as_deref(), Ok(""));
        assert!(page_of_couplets("", page(2, 10)).is_err());
    }

    #[rstest]
    fn keeps_single_line_breaks_inside_couplets() {
        let text = "line one\nline two\n\nline three";
        assert_eq!(
            page_of_couplets(text, page(1, 1)).as_deref(),
            Ok("line one\nline two")
        );
    }

    #[rstest]
    #[case(5, 2)]
    #[case(6, 3)]
    #[case(1, 4)]
    fn last_page_holds_the_remainder(#[case] couplets: usize, #[case] limit: usize) {
        let text = (0..couplets)
            .map(|index| format!("verse {index}"))
            .collect::<Vec<_>>()
            .join(COUPLET_SEPARATOR);
        let last_page = couplets.div_ceil(limit);
        let remainder = couplets - (last_page - 1) * limit;
        let limit_value = i64::try_from(limit).expect("small limit");
        let last_value = i64::try_from(last_page).expect("small page");

        let selected = page_of_couplets(&text, page(last_value, limit_value)).expect("last page");
        assert_eq!(selected.split(COUPLET_SEPARATOR).count(), remainder);
        assert!(page_of_couplets(&text, page(last_value + 1, limit_value)).is_err());
    }

    #[rstest]
    fn paging_is_idempotent() {
        let first = page_of_couplets(THREE_COUPLETS, page(2, 2));
        let second = page_of_couplets(THREE_COUPLETS, page(2, 2));
        assert_eq!(first, second);
    }
}
