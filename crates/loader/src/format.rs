//! JSON input documents.
//!
//! Hotels arrive as `{"sr": [{"id", "f", "ad", "ci", "pr", "ll": {"lat", "lng"}}]}`
//! with coordinates as decimal strings (plain numbers are accepted too).
//! Review batches arrive as
//! `{"reviewDetails": {"reviewCollection": {"review": [...]}}}`.

use lodge_store::{Address, Hotel, ReviewInput};
use serde::Deserialize;

/// Hotels parsed from one document.
#[derive(Debug, Default)]
pub struct HotelBatch {
	pub hotels: Vec<Hotel>,
	/// Records that were present but unusable.
	pub rejected: usize,
}

#[derive(Deserialize)]
struct HotelsDocument {
	#[serde(default)]
	sr: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct HotelRecord {
	id: String,
	#[serde(rename = "f")]
	name: String,
	#[serde(rename = "ad")]
	street: String,
	#[serde(rename = "ci")]
	city: String,
	#[serde(rename = "pr")]
	state: String,
	#[serde(rename = "ll")]
	location: Location,
}

#[derive(Deserialize)]
struct Location {
	lat: Coordinate,
	lng: Coordinate,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Coordinate {
	Number(f64),
	Text(String),
}

impl Coordinate {
	fn value(&self) -> Option<f64> {
		match self {
			Self::Number(value) => Some(*value),
			Self::Text(text) => text.trim().parse().ok(),
		}
	}
}

impl HotelRecord {
	fn into_hotel(self) -> Option<Hotel> {
		let latitude = self.location.lat.value()?;
		let longitude = self.location.lng.value()?;
		let address = Address::new(self.street, self.city, self.state, latitude, longitude);
		Some(Hotel::new(self.id, self.name, address))
	}
}

/// Parses a hotels document.
///
/// The document as a whole must be valid JSON with the `sr` array; records
/// inside it that are malformed are skipped and counted in
/// [`HotelBatch::rejected`].
pub fn parse_hotels(text: &str) -> Result<HotelBatch, serde_json::Error> {
	let document: HotelsDocument = serde_json::from_str(text)?;
	let mut batch = HotelBatch::default();
	for (index, value) in document.sr.into_iter().enumerate() {
		match serde_json::from_value::<HotelRecord>(value).map(HotelRecord::into_hotel) {
			Ok(Some(hotel)) => batch.hotels.push(hotel),
			Ok(None) => {
				tracing::debug!(index, "loader.hotel.bad_coordinates");
				batch.rejected += 1;
			}
			Err(err) => {
				tracing::debug!(index, %err, "loader.hotel.malformed");
				batch.rejected += 1;
			}
		}
	}
	Ok(batch)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewDocument {
	review_details: ReviewDetails,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewDetails {
	review_collection: ReviewCollection,
}

#[derive(Deserialize)]
struct ReviewCollection {
	#[serde(default)]
	review: Vec<ReviewRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewRecord {
	hotel_id: String,
	review_id: String,
	rating_overall: i64,
	#[serde(default)]
	title: String,
	#[serde(default)]
	review_text: String,
	#[serde(default)]
	is_recommended: String,
	review_submission_time: String,
	#[serde(default)]
	user_nickname: Option<String>,
}

impl From<ReviewRecord> for ReviewInput {
	fn from(record: ReviewRecord) -> Self {
		Self {
			hotel_id: record.hotel_id,
			review_id: record.review_id,
			rating: record.rating_overall,
			title: record.title,
			text: record.review_text,
			recommended: record.is_recommended.eq_ignore_ascii_case("yes"),
			submitted: record.review_submission_time,
			author: record.user_nickname,
		}
	}
}

/// Parses one review batch.
///
/// Parsing is all or nothing: a structural error anywhere in the document
/// fails the whole batch. Field validation (rating range, timestamp) is left
/// to the store.
pub fn parse_review_batch(text: &str) -> Result<Vec<ReviewInput>, serde_json::Error> {
	let document: ReviewDocument = serde_json::from_str(text)?;
	Ok(document
		.review_details
		.review_collection
		.review
		.into_iter()
		.map(ReviewInput::from)
		.collect())
}
