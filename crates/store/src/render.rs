//! Deterministic text snapshot of the store.

use std::fmt::Write;

use crate::engine::HotelData;

/// Line between a hotel header and each of its reviews.
pub const REVIEW_SEPARATOR: &str = "--------------------";

/// Line preceding each hotel in a full snapshot.
pub const HOTEL_SEPARATOR: &str = "********************";

/// Appends one hotel block: header, then every review behind a separator
/// line, then a final newline. Unknown ids append nothing.
pub(crate) fn write_hotel(out: &mut String, data: &HotelData, hotel_id: &str) {
	let Some(hotel) = data.hotel(hotel_id) else {
		return;
	};
	let _ = write!(out, "{hotel}");
	for review in data.reviews(hotel_id) {
		let _ = write!(out, "\n{REVIEW_SEPARATOR}\n{review}");
	}
	out.push('\n');
}

/// Every hotel in id order, each introduced by a blank line and
/// [`HOTEL_SEPARATOR`].
pub(crate) fn write_all(out: &mut String, data: &HotelData) {
	for hotel_id in data.ids() {
		let _ = write!(out, "\n{HOTEL_SEPARATOR}\n");
		write_hotel(out, data, hotel_id);
	}
}
