use std::cmp::Ordering;
use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, NaiveDateTime};

use crate::error::ReviewError;


/// Accepted ratings, inclusive.
pub const RATING_RANGE: RangeInclusive<i64> = 1..=5;

/// Submission time layout, e.g. `2016-06-29T17:50:37`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Author recorded when the input has none.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

const DISPLAY_FORMAT: &str = "%a %b %d %H:%M:%S UTC %Y";

/// Parses a submission time.
///
/// Accepts [`TIMESTAMP_FORMAT`] with an optional trailing `Z`, or a full
/// RFC 3339 timestamp with offset, which is converted to UTC.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
	let raw = raw.trim();
	if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
		return Some(dt.naive_utc());
	}
	match NaiveDateTime::parse_and_remainder(raw, TIMESTAMP_FORMAT) {
		Ok((dt, "" | "Z")) => Some(dt),
		_ => None,
	}
}

/// Unvalidated review fields as they arrive from an input document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewInput {
	pub hotel_id: String,
	pub review_id: String,
	pub rating: i64,
	pub title: String,
	pub text: String,
	pub recommended: bool,
	pub submitted: String,
	pub author: Option<String>,
}

/// A validated review.
///
/// Ordered most recent first, then by author, then by review id. Equality
/// follows the same key, so a set keeps one review per
/// `(submitted, author, review_id)`.
#[derive(Debug, Clone)]
pub struct Review {
	hotel_id: String,
	review_id: String,
	rating: u8,
	title: String,
	text: String,
	recommended: bool,
	submitted: NaiveDateTime,
	author: String,
}

impl Review {
	/// Validates `input`.
	///
	/// # Errors
	///
	/// [`ReviewError::InvalidRating`] or [`ReviewError::InvalidTimestamp`];
	/// nothing is constructed on failure.
	pub fn from_input(input: ReviewInput) -> Result<Self, ReviewError> {
		if !RATING_RANGE.contains(&input.rating) {
			return Err(ReviewError::InvalidRating { rating: input.rating });
		}
		let Some(submitted) = parse_timestamp(&input.submitted) else {
			return Err(ReviewError::InvalidTimestamp { value: input.submitted });
		};
		let author = match input.author {
			Some(author) if !author.is_empty() => author,
			_ => ANONYMOUS_AUTHOR.to_string(),
		};

		Ok(Self {
			hotel_id: input.hotel_id,
			review_id: input.review_id,
			rating: input.rating as u8,
			title: input.title,
			text: input.text,
			recommended: input.recommended,
			submitted,
			author,
		})
	}

	pub fn hotel_id(&self) -> &str {
		&self.hotel_id
	}

	pub fn review_id(&self) -> &str {
		&self.review_id
	}

	pub fn rating(&self) -> u8 {
		self.rating
	}

	pub fn title(&self) -> &str {
		&self.title
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn is_recommended(&self) -> bool {
		self.recommended
	}

	pub fn submitted(&self) -> NaiveDateTime {
		self.submitted
	}

	pub fn author(&self) -> &str {
		&self.author
	}
}

impl Ord for Review {
	fn cmp(&self, other: &Self) -> Ordering {
		other
			.submitted
			.cmp(&self.submitted)
			.then_with(|| self.author.cmp(&other.author))
			.then_with(|| self.review_id.cmp(&other.review_id))
	}
}

impl PartialOrd for Review {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for Review {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for Review {}

/// Four-line block: byline, rating, title, text.
impl fmt::Display for Review {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Review by {} on {}\nRating: {}\n{}\n{}",
			self.author,
			self.submitted.format(DISPLAY_FORMAT),
			self.rating,
			self.title,
			self.text
		)
	}
}
