//! Page accumulation state for collection reads.

// std
use std::mem;
// self
use crate::_prelude::*;

/// Order in which accumulated pages are concatenated.
///
/// `Prepend` places each new page in front of the pages already collected, so the final
/// sequence holds the last page first. `Append` yields pages in fetch order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageOrder {
	/// Newest page first.
	#[default]
	Prepend,
	/// Pages in fetch order.
	Append,
}

/// Transient state of one paginated read: next page index, collected items, and whether the
/// last page has been seen.
#[derive(Clone, Debug)]
pub struct PageAccumulator {
	page: u32,
	page_size: usize,
	order: PageOrder,
	items: Vec<Value>,
	done: bool,
}
impl PageAccumulator {
	/// Starts at page 1 with nothing collected.
	pub fn new(page_size: u32, order: PageOrder) -> Self {
		Self {
			page: 1,
			page_size: usize::try_from(page_size).unwrap_or(usize::MAX),
			order,
			items: Vec::new(),
			done: false,
		}
	}

	/// 1-based index of the next page to fetch.
	pub fn page(&self) -> u32 {
		self.page
	}

	/// Returns `true` once a page shorter than the page size has been absorbed.
	pub fn is_done(&self) -> bool {
		self.done
	}

	/// Number of items collected so far.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Returns `true` when nothing has been collected.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Adds one page of items and advances to the next page index.
	///
	/// A page holding fewer than `page_size` items, including an empty one, is the last.
	pub fn absorb(&mut self, mut page: Vec<Value>) {
		self.done = page.len() < self.page_size;

		match self.order {
			PageOrder::Prepend => {
				page.append(&mut self.items);

				self.items = page;
			},
			PageOrder::Append => self.items.append(&mut page),
		}

		self.page = self.page.saturating_add(1);
	}

	/// Consumes the accumulator, returning the collected items.
	pub fn into_items(self) -> Vec<Value> {
		self.items
	}

	/// Takes the collected items, leaving the accumulator empty.
	pub fn take_items(&mut self) -> Vec<Value> {
		mem::take(&mut self.items)
	}
}
