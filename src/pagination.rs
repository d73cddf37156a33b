//! Windowing of ordered result sets. Pages are 1-indexed.

/// Page shown when none is requested.
pub const FIRST_PAGE: usize = 1;

/// The slice of `results` visible on `page` (default [`FIRST_PAGE`]), i.e. `[(page - 1) * page_size, page * page_size)` clipped to bounds.
///
/// Page `0` behaves like page `1`. Pages beyond the last one yield an empty slice,
/// but nothing here stops a caller from requesting them.
#[must_use]
pub fn window_for<T>(results: &[T], page: Option<usize>, page_size: usize) -> &[T] {
	let page = page.unwrap_or(FIRST_PAGE);
	let start = page.saturating_sub(1).saturating_mul(page_size).min(results.len());
	let end = start.saturating_add(page_size).min(results.len());
	&results[start..end]
}

/// `ceil(len / page_size)`, or `0` for an empty page size.
#[must_use]
pub fn page_count(len: usize, page_size: usize) -> usize {
	if page_size == 0 {
		0
	} else {
		(len + page_size - 1) / page_size
	}
}

/// Which page navigation buttons to show, as the page each one leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageButtons {
	pub previous: Option<usize>,
	pub next: Option<usize>,
}

impl PageButtons {
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.previous.is_none() && self.next.is_none()
	}
}

/// No buttons for a single page (or none), only "next" on the first page,
/// only "previous" on the last page and both anywhere else.
/// Page `0` is treated as the first page, like in [`window_for`].
#[must_use]
pub fn page_buttons(len: usize, page_size: usize, page: usize) -> PageButtons {
	let page = page.max(FIRST_PAGE);
	let pages = page_count(len, page_size);
	if pages <= 1 {
		return PageButtons::default();
	}

	let previous = Some(page.saturating_sub(1));
	let next = Some(page + 1);
	if page <= FIRST_PAGE {
		PageButtons { previous: None, next }
	} else if page == pages {
		PageButtons { previous, next: None }
	} else {
		PageButtons { previous, next }
	}
}
