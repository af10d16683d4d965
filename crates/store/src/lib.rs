//! Hotel and review store.
//!
//! [`HotelData`] is the unsynchronized engine: hotels ordered by id, and per
//! hotel a set of reviews ordered most recent first. [`GuardedStore`] wraps
//! it behind one [`lodge_sync::ReentrantRwLock`] so many loader threads can
//! insert while others read.

mod engine;
mod error;
mod guarded;
mod model;
mod render;
mod review;

pub use engine::HotelData;
pub use error::{ReviewError, StoreError};
pub use guarded::GuardedStore;
pub use model::{Address, Hotel};
pub use render::{HOTEL_SEPARATOR, REVIEW_SEPARATOR};
pub use review::{ANONYMOUS_AUTHOR, RATING_RANGE, Review, ReviewInput, TIMESTAMP_FORMAT, parse_timestamp};
