use std::path::Path;

use lodge_sync::ReentrantRwLock;
use parking_lot::RwLock;

use crate::engine::HotelData;
use crate::error::{Result, StoreError};
use crate::model::{Address, Hotel};
use crate::render;
use crate::review::{Review, ReviewInput};

/// Thread-safe façade over [`HotelData`].
///
/// Every operation holds the store's [`ReentrantRwLock`] for its whole
/// duration and calls only into the engine, never into another façade
/// method, so no operation depends on the lock's reentrancy.
///
/// The inner `RwLock` only provides interior mutability: it is always taken
/// after the reentrant lock admitted the caller and is therefore never
/// contended.
#[derive(Debug, Default)]
pub struct GuardedStore {
	lock: ReentrantRwLock,
	data: RwLock<HotelData>,
}

impl GuardedStore {
	/// Empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Wraps an already populated engine.
	pub fn from_data(data: HotelData) -> Self {
		Self {
			lock: ReentrantRwLock::new(),
			data: RwLock::new(data),
		}
	}

	fn with_read<R>(&self, f: impl FnOnce(&HotelData) -> R) -> R {
		let _hold = self.lock.read();
		f(&self.data.read())
	}

	fn with_write<R>(&self, f: impl FnOnce(&mut HotelData) -> R) -> Result<R> {
		let _hold = self.lock.write()?;
		Ok(f(&mut self.data.write()))
	}

	/// Inserts or replaces a hotel; the last writer wins.
	pub fn insert_entity(&self, hotel: Hotel) -> Result<()> {
		let replaced = self.with_write(|data| data.insert_hotel(hotel))?;
		if let Some(old) = replaced {
			tracing::debug!(hotel_id = old.id(), "store.hotel.replaced");
		}
		Ok(())
	}

	/// Builds and inserts a hotel from its parts.
	pub fn add_hotel(&self, id: impl Into<String>, name: impl Into<String>, address: Address) -> Result<()> {
		self.insert_entity(Hotel::new(id, name, address))
	}

	/// Validates and inserts one review.
	///
	/// Returns `false` when an equal review (same time, author and id) was
	/// already stored; the set keeps the first. The hotel does not have to
	/// exist yet. On a validation error the store is unchanged and the error
	/// is returned as [`StoreError::Review`].
	pub fn insert_child(&self, input: ReviewInput) -> Result<bool> {
		let hotel_id = input.hotel_id.clone();
		let review_id = input.review_id.clone();
		match self.with_write(|data| data.insert_review(input))? {
			Ok(true) => Ok(true),
			Ok(false) => {
				tracing::debug!(%hotel_id, %review_id, "store.review.duplicate");
				Ok(false)
			}
			Err(err) => {
				tracing::debug!(%hotel_id, %review_id, %err, "store.review.rejected");
				Err(StoreError::Review(err))
			}
		}
	}

	/// Mean rating over the hotel's current reviews, `0.0` without reviews.
	pub fn compute_aggregate(&self, hotel_id: &str) -> f64 {
		self.with_read(|data| data.average_rating(hotel_id))
	}

	/// Stores the mean as of this call on the hotel.
	///
	/// Later reviews do not update it. Returns `None` for unknown hotels.
	pub fn record_aggregate(&self, hotel_id: &str) -> Result<Option<f64>> {
		self.with_write(|data| data.record_average(hotel_id))
	}

	/// Copy of the hotel, including its recorded average, if known.
	pub fn lookup(&self, hotel_id: &str) -> Option<Hotel> {
		self.with_read(|data| data.hotel(hotel_id).cloned())
	}

	/// Whether a hotel with this id has been inserted. Reviews alone do not count.
	pub fn exists(&self, hotel_id: &str) -> bool {
		self.with_read(|data| data.contains(hotel_id))
	}

	/// All hotel ids, ascending.
	pub fn list_ids(&self) -> Vec<String> {
		self.with_read(|data| data.ids().map(str::to_string).collect())
	}

	/// First `limit` reviews of the hotel, most recent first.
	pub fn list_children(&self, hotel_id: &str, limit: usize) -> Vec<Review> {
		self.with_read(|data| data.reviews(hotel_id).take(limit).cloned().collect())
	}

	/// Reviews stored under the hotel id, whether or not the hotel exists.
	pub fn review_count(&self, hotel_id: &str) -> usize {
		self.with_read(|data| data.review_count(hotel_id))
	}

	/// Reviews across every hotel id.
	pub fn total_reviews(&self) -> usize {
		self.with_read(HotelData::total_reviews)
	}

	/// Number of hotels.
	pub fn hotel_count(&self) -> usize {
		self.with_read(HotelData::len)
	}

	/// Display name of the hotel.
	pub fn hotel_name(&self, hotel_id: &str) -> Option<String> {
		self.with_read(|data| data.hotel(hotel_id).map(|h| h.name().to_string()))
	}

	/// Street line of the hotel's address.
	pub fn hotel_address(&self, hotel_id: &str) -> Option<String> {
		self.with_read(|data| data.hotel(hotel_id).map(|h| h.address().street.clone()))
	}

	/// City of the hotel's address.
	pub fn hotel_city(&self, hotel_id: &str) -> Option<String> {
		self.with_read(|data| data.hotel(hotel_id).map(|h| h.address().city.clone()))
	}

	/// State of the hotel's address.
	pub fn hotel_state(&self, hotel_id: &str) -> Option<String> {
		self.with_read(|data| data.hotel(hotel_id).map(|h| h.address().state.clone()))
	}

	/// `(latitude, longitude)` of the hotel.
	pub fn hotel_coordinates(&self, hotel_id: &str) -> Option<(f64, f64)> {
		self.with_read(|data| data.hotel(hotel_id).map(|h| (h.address().latitude, h.address().longitude)))
	}

	/// Text block for one hotel and its reviews; empty for unknown ids.
	pub fn render(&self, hotel_id: &str) -> String {
		self.with_read(|data| {
			let mut out = String::new();
			render::write_hotel(&mut out, data, hotel_id);
			out
		})
	}

	/// Text blocks for every hotel in id order.
	pub fn render_all(&self) -> String {
		self.with_read(|data| {
			let mut out = String::new();
			render::write_all(&mut out, data);
			out
		})
	}

	/// Writes [`Self::render_all`] to `path`.
	pub fn write_snapshot(&self, path: &Path) -> Result<()> {
		let snapshot = self.render_all();
		std::fs::write(path, snapshot).map_err(|error| StoreError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		tracing::info!(path = %path.display(), "store.snapshot.written");
		Ok(())
	}
}
