use std::collections::{BTreeMap, BTreeSet};

use crate::error::ReviewError;
use crate::model::Hotel;
use crate::review::{Review, ReviewInput};

/// Unsynchronized hotel/review tables.
///
/// Reviews are keyed by the hotel id they carry and may arrive before, or
/// without, the hotel itself.
#[derive(Debug, Default, Clone)]
pub struct HotelData {
	hotels: BTreeMap<String, Hotel>,
	reviews: BTreeMap<String, BTreeSet<Review>>,
}

impl HotelData {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces a hotel. Returns the replaced entry.
	pub fn insert_hotel(&mut self, hotel: Hotel) -> Option<Hotel> {
		self.hotels.insert(hotel.id().to_string(), hotel)
	}

	/// Validates and inserts one review.
	///
	/// Returns `Ok(false)` when an equal review (same time, author and id)
	/// was already present. On `Err` nothing changed.
	pub fn insert_review(&mut self, input: ReviewInput) -> Result<bool, ReviewError> {
		let review = Review::from_input(input)?;
		let set = self.reviews.entry(review.hotel_id().to_string()).or_default();
		Ok(set.insert(review))
	}

	/// Mean rating of the hotel's current reviews, `0.0` if it has none.
	pub fn average_rating(&self, hotel_id: &str) -> f64 {
		let Some(reviews) = self.reviews.get(hotel_id).filter(|set| !set.is_empty()) else {
			return 0.0;
		};
		let sum: u64 = reviews.iter().map(|r| u64::from(r.rating())).sum();
		sum as f64 / reviews.len() as f64
	}

	/// Stores the current mean on the hotel. `None` if the hotel is unknown.
	pub fn record_average(&mut self, hotel_id: &str) -> Option<f64> {
		let average = self.average_rating(hotel_id);
		let hotel = self.hotels.get_mut(hotel_id)?;
		hotel.set_average_rating(average);
		Some(average)
	}

	pub fn hotel(&self, hotel_id: &str) -> Option<&Hotel> {
		self.hotels.get(hotel_id)
	}

	pub fn contains(&self, hotel_id: &str) -> bool {
		self.hotels.contains_key(hotel_id)
	}

	/// Hotel ids in ascending order.
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.hotels.keys().map(String::as_str)
	}

	/// Reviews of one hotel, most recent first.
	pub fn reviews(&self, hotel_id: &str) -> impl Iterator<Item = &Review> {
		self.reviews.get(hotel_id).into_iter().flatten()
	}

	pub fn review_count(&self, hotel_id: &str) -> usize {
		self.reviews.get(hotel_id).map_or(0, BTreeSet::len)
	}

	/// Reviews across all hotels, including hotels not in the hotel table.
	pub fn total_reviews(&self) -> usize {
		self.reviews.values().map(BTreeSet::len).sum()
	}

	/// Number of hotels.
	pub fn len(&self) -> usize {
		self.hotels.len()
	}

	pub fn is_empty(&self) -> bool {
		self.hotels.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::Address;

	fn hotel(id: &str, name: &str) -> Hotel {
		Hotel::new(id, name, Address::new("1 Main St", "Springfield", "IL", 39.8, -89.6))
	}

	fn review(hotel_id: &str, review_id: &str, rating: i64) -> ReviewInput {
		ReviewInput {
			hotel_id: hotel_id.to_string(),
			review_id: review_id.to_string(),
			rating,
			title: String::new(),
			text: String::new(),
			recommended: false,
			submitted: "2016-06-29T17:50:37".to_string(),
			author: Some("Amy".to_string()),
		}
	}

	#[test]
	fn hotel_insert_replaces_without_merge() {
		let mut data = HotelData::new();
		assert!(data.insert_hotel(hotel("1", "Old")).is_none());
		let replaced = data.insert_hotel(hotel("1", "New")).expect("previous entry");
		assert_eq!(replaced.name(), "Old");
		assert_eq!(data.hotel("1").map(Hotel::name), Some("New"));
		assert_eq!(data.len(), 1);
	}

	#[test]
	fn ids_are_sorted() {
		let mut data = HotelData::new();
		for id in ["30", "10", "20"] {
			data.insert_hotel(hotel(id, id));
		}
		assert_eq!(data.ids().collect::<Vec<_>>(), ["10", "20", "30"]);
	}

	#[test]
	fn invalid_review_changes_nothing() {
		let mut data = HotelData::new();
		data.insert_hotel(hotel("1", "A"));
		data.insert_review(review("1", "ok", 3)).expect("valid");

		assert!(data.insert_review(review("1", "bad", 9)).is_err());
		let mut bad_time = review("1", "bad-time", 3);
		bad_time.submitted = "not a date".to_string();
		assert!(data.insert_review(bad_time).is_err());

		assert_eq!(data.review_count("1"), 1);
		assert_eq!(data.len(), 1);
	}

	#[test]
	fn reviews_for_unknown_hotel_are_kept() {
		let mut data = HotelData::new();
		assert_eq!(data.insert_review(review("ghost", "r1", 5)), Ok(true));
		assert_eq!(data.review_count("ghost"), 1);
		assert!(!data.contains("ghost"));
		assert_eq!(data.record_average("ghost"), None);
		assert_eq!(data.average_rating("ghost"), 5.0);
	}

	#[test]
	fn average_is_exact_mean_and_zero_when_empty() {
		let mut data = HotelData::new();
		data.insert_hotel(hotel("1", "A"));
		assert_eq!(data.average_rating("1"), 0.0);

		for (i, rating) in [1, 2, 4, 5].into_iter().enumerate() {
			data.insert_review(review("1", &format!("r{i}"), rating)).expect("valid");
		}
		assert_eq!(data.average_rating("1"), 3.0);
		assert_eq!(data.record_average("1"), Some(3.0));
		assert_eq!(data.hotel("1").and_then(Hotel::average_rating), Some(3.0));
	}

	#[test]
	fn recorded_average_is_not_retroactive() {
		let mut data = HotelData::new();
		data.insert_hotel(hotel("1", "A"));
		data.insert_review(review("1", "r1", 2)).expect("valid");
		data.record_average("1");
		data.insert_review(review("1", "r2", 4)).expect("valid");

		assert_eq!(data.hotel("1").and_then(Hotel::average_rating), Some(2.0));
		assert_eq!(data.average_rating("1"), 3.0);
	}
}
