//! Query-string filters and URL assembly.
//!
//! Filters are pre-formatted `key=value` fragments. No percent-encoding happens here; callers
//! encode values that need it.

// std
use std::slice::Iter;
// self
use crate::_prelude::*;

const PAGE_SIZE_MARKER: &str = "page[size]=";
const PAGE_NUMBER_MARKER: &str = "page[number]";

/// A single `key=value` query fragment.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(String);
impl Filter {
	/// Formats `key=value` without escaping either side.
	pub fn new(key: impl Display, value: impl Display) -> Self {
		Self(format!("{key}={value}"))
	}

	/// Wraps an already formatted fragment.
	pub fn raw(fragment: impl Into<String>) -> Self {
		Self(fragment.into())
	}

	/// `page[size]=<size>` directive.
	pub fn page_size(size: u32) -> Self {
		Self::new("page[size]", size)
	}

	/// `page[number]=<number>` directive (1-based).
	pub fn page_number(number: u32) -> Self {
		Self::new("page[number]", number)
	}

	/// Returns `true` when the fragment already sets a page size.
	pub fn is_page_size(&self) -> bool {
		self.0.contains(PAGE_SIZE_MARKER)
	}

	/// Returns `true` when the fragment pins a page number.
	pub fn is_page_number(&self) -> bool {
		self.0.contains(PAGE_NUMBER_MARKER)
	}

	/// The fragment as it will appear in the URL.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Filter {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Debug for Filter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Filter({})", self.0)
	}
}
impl Display for Filter {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl From<&str> for Filter {
	fn from(value: &str) -> Self {
		Self::raw(value)
	}
}
impl From<String> for Filter {
	fn from(value: String) -> Self {
		Self::raw(value)
	}
}

/// Ordered filter sequence; insertion order is preserved in the final URL.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filters(Vec<Filter>);
impl Filters {
	/// Creates an empty sequence.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a filter.
	pub fn push(&mut self, filter: impl Into<Filter>) {
		self.0.push(filter.into());
	}

	/// Appends a filter, builder style.
	pub fn with(mut self, filter: impl Into<Filter>) -> Self {
		self.push(filter);

		self
	}

	/// Returns `true` when no filters are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Number of filters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Iterates the filters in insertion order.
	pub fn iter(&self) -> Iter<'_, Filter> {
		self.0.iter()
	}

	/// Returns `true` when any filter sets a page size.
	pub fn has_page_size(&self) -> bool {
		self.0.iter().any(Filter::is_page_size)
	}

	/// Returns `true` when any filter pins a page number.
	pub fn has_page_number(&self) -> bool {
		self.0.iter().any(Filter::is_page_number)
	}

	/// Renders the query string without the leading `?`.
	pub fn to_query(&self) -> String {
		let mut buf = String::new();

		for (idx, filter) in self.0.iter().enumerate() {
			if idx > 0 {
				buf.push('&');
			}

			buf.push_str(filter.as_str());
		}

		buf
	}
}
impl<F> FromIterator<F> for Filters
where
	F: Into<Filter>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = F>,
	{
		Self(iter.into_iter().map(Into::into).collect())
	}
}
impl<F, const N: usize> From<[F; N]> for Filters
where
	F: Into<Filter>,
{
	fn from(value: [F; N]) -> Self {
		value.into_iter().collect()
	}
}
impl From<Vec<Filter>> for Filters {
	fn from(value: Vec<Filter>) -> Self {
		Self(value)
	}
}
impl<'a> IntoIterator for &'a Filters {
	type IntoIter = Iter<'a, Filter>;
	type Item = &'a Filter;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}

/// Concatenates `base_url + path`, appending `?` and the `&`-joined filters when any exist.
pub fn build_url(base_url: &str, path: &str, filters: &Filters) -> String {
	if filters.is_empty() {
		format!("{base_url}{path}")
	} else {
		format!("{base_url}{path}?{}", filters.to_query())
	}
}
