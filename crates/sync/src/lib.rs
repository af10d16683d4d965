//! Reentrant read/write monitor with owner-keyed hold counts.
//!
//! Unlike [`std::sync::RwLock`], holds are counted per owner so the same
//! owner may nest acquisitions:
//!
//! * any number of owners may hold read locks while nobody writes,
//! * one owner may hold the write lock, nest further write locks and take
//!   read locks on top,
//! * an owner holding only read locks can never become the writer.
//!
//! The last rule is enforced eagerly: a blocking write acquisition by a
//! read-only holder returns [`LockError::UpgradeNotSupported`] instead of
//! waiting on itself forever.

mod error;
mod guard;
mod lock;
mod owner;
mod state;

pub use error::{HoldKind, LockError};
pub use guard::{ReadGuard, WriteGuard};
pub use lock::ReentrantRwLock;
pub use owner::OwnerToken;
pub use state::LockState;
