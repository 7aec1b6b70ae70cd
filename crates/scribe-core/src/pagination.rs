//! Page arithmetic for post listings.

use serde::Serialize;

use crate::domain::Post;
use crate::error::RepoError;
use crate::ports::PostRepository;

/// Posts shown per listing page.
pub const PAGE_SIZE: u64 = 5;

/// Largest offset a SQL backend accepts (signed 64-bit).
pub const MAX_SKIP: u64 = i64::MAX as u64;

/// A validated, 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageNumber(u64);

impl PageNumber {
    pub const FIRST: Self = Self(1);

    /// Parse a raw `?page=` value. Absent, non-numeric and zero values fall
    /// back to the first page.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<u64>().ok())
            .and_then(Self::new)
            .unwrap_or(Self::FIRST)
    }

    pub fn new(page: u64) -> Option<Self> {
        (page >= 1).then_some(Self(page))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The skip/limit pair bounding this page. Pages past [`MAX_SKIP`] rows
    /// stay pinned there and come back empty.
    pub fn window(self, page_size: u64) -> PageWindow {
        PageWindow {
            skip: page_size.saturating_mul(self.0 - 1).min(MAX_SKIP),
            limit: page_size,
        }
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Pagination window: how many rows to skip and how many to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u64,
}

/// One page of results with neighbour links.
///
/// `next_page` / `prev_page` are `None` when there is no such page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: PageNumber,
    pub page_size: u64,
    pub total_count: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: PageNumber, page_size: u64, total_count: u64) -> Self {
        let current = page.get();
        let has_next_page = current.saturating_mul(page_size) < total_count;
        let has_prev_page = current > 1;

        Self {
            items,
            page,
            page_size,
            total_count,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then(|| current + 1),
            prev_page: has_prev_page.then(|| current - 1),
        }
    }
}

/// Fetch one listing page, newest posts first.
pub async fn recent_posts(
    posts: &dyn PostRepository,
    page: PageNumber,
) -> Result<Page<Post>, RepoError> {
    let window = page.window(PAGE_SIZE);
    let items = posts.list_recent(window).await?;
    let total_count = posts.count().await?;

    tracing::debug!(
        page = page.get(),
        skip = window.skip,
        total_count,
        "Listing posts"
    );

    Ok(Page::new(items, page, PAGE_SIZE, total_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_first_page() {
        assert_eq!(PageNumber::parse(None), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("abc")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("0")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("-2")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("2x")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some(" 3 ")).get(), 3);
    }

    #[test]
    fn test_first_page_of_twelve() {
        let page = PageNumber::parse(Some("1"));
        assert_eq!(page.window(5), PageWindow { skip: 0, limit: 5 });

        let listing = Page::new(vec![(); 5], page, 5, 12);
        assert!(listing.has_next_page);
        assert_eq!(listing.next_page, Some(2));
        assert!(!listing.has_prev_page);
        assert_eq!(listing.prev_page, None);
    }

    #[test]
    fn test_last_page_of_twelve() {
        let page = PageNumber::new(3).unwrap();
        assert_eq!(page.window(5), PageWindow { skip: 10, limit: 5 });

        let listing = Page::new(vec![(); 2], page, 5, 12);
        assert_eq!(listing.items.len(), 2);
        assert!(!listing.has_next_page);
        assert_eq!(listing.next_page, None);
        assert!(listing.has_prev_page);
        assert_eq!(listing.prev_page, Some(2));
    }

    #[test]
    fn test_exact_multiple_has_no_next_page() {
        let listing = Page::new(vec![(); 5], PageNumber::new(2).unwrap(), 5, 10);
        assert!(!listing.has_next_page);
        assert_eq!(listing.prev_page, Some(1));
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let page = PageNumber::new(u64::MAX).unwrap();
        assert_eq!(page.window(5).skip, MAX_SKIP);

        let listing: Page<()> = Page::new(Vec::new(), page, 5, 3);
        assert!(!listing.has_next_page);
        assert!(listing.has_prev_page);
    }

    #[test]
    fn test_huge_page_offset_fits_signed_bind() {
        let page = PageNumber::parse(Some("2000000000000000000"));
        assert_eq!(page.get(), 2_000_000_000_000_000_000);

        let window = page.window(PAGE_SIZE);
        assert!(i64::try_from(window.skip).is_ok());
        assert_eq!(window.limit, PAGE_SIZE);
    }
}
