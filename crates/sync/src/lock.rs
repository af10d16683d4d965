use parking_lot::{Condvar, Mutex};

use crate::error::LockError;
use crate::guard::{ReadGuard, WriteGuard};
use crate::owner::OwnerToken;
use crate::state::LockState;

/// Reentrant read/write monitor.
///
/// All operations act on behalf of the calling thread ([`OwnerToken::current`]).
/// One internal mutex serializes every state change; blocked acquirers wait
/// on a condition variable that is broadcast whenever the reader set or the
/// writer slot empties. There is no fairness: wakers race and re-check.
///
/// The lock guards no data. Pair it with the data it protects, as
/// `lodge_store::GuardedStore` does.
#[derive(Default)]
pub struct ReentrantRwLock {
	state: Mutex<LockState>,
	released: Condvar,
}

impl ReentrantRwLock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `true` if the calling thread holds at least one read lock.
	pub fn is_read_held(&self) -> bool {
		self.state.lock().read_count(OwnerToken::current()) > 0
	}

	/// Returns `true` if the calling thread holds at least one write lock.
	pub fn is_write_held(&self) -> bool {
		self.state.lock().write_count(OwnerToken::current()) > 0
	}

	/// Read holds of the calling thread.
	pub fn read_count(&self) -> usize {
		self.state.lock().read_count(OwnerToken::current())
	}

	/// Write holds of the calling thread.
	pub fn write_count(&self) -> usize {
		self.state.lock().write_count(OwnerToken::current())
	}

	/// Owner currently holding the write lock.
	pub fn writer(&self) -> Option<OwnerToken> {
		self.state.lock().writer()
	}

	/// Number of distinct owners currently holding read locks.
	pub fn reader_count(&self) -> usize {
		self.state.lock().reader_count()
	}

	/// Non-blocking read acquisition.
	///
	/// Succeeds when nobody writes or when the caller is the writer.
	pub fn try_acquire_read(&self) -> bool {
		let owner = OwnerToken::current();
		let acquired = self.state.lock().try_read(owner);
		tracing::trace!(?owner, acquired, "sync.lock.try_read");
		acquired
	}

	/// Non-blocking write acquisition.
	///
	/// Succeeds when the lock is entirely free or when the caller already
	/// writes. Returns `false` for a read-only holder, without side effects.
	pub fn try_acquire_write(&self) -> bool {
		let owner = OwnerToken::current();
		let acquired = self.state.lock().try_write(owner);
		tracing::trace!(?owner, acquired, "sync.lock.try_write");
		acquired
	}

	/// Blocks until a read hold is taken.
	pub fn acquire_read(&self) {
		let owner = OwnerToken::current();
		let mut state = self.state.lock();
		while !state.try_read(owner) {
			tracing::trace!(?owner, writer = ?state.writer(), "sync.lock.wait_read");
			self.released.wait(&mut state);
		}
	}

	/// Blocks until a write hold is taken.
	///
	/// # Errors
	///
	/// [`LockError::UpgradeNotSupported`] if the caller holds read locks but
	/// not the write lock. Waiting would deadlock on the caller's own reads.
	pub fn acquire_write(&self) -> Result<(), LockError> {
		let owner = OwnerToken::current();
		let mut state = self.state.lock();
		if state.is_upgrade(owner) {
			let reads = state.read_count(owner);
			tracing::warn!(?owner, reads, "sync.lock.upgrade_rejected");
			return Err(LockError::UpgradeNotSupported { reads });
		}
		while !state.try_write(owner) {
			tracing::trace!(?owner, writer = ?state.writer(), readers = state.reader_count(), "sync.lock.wait_write");
			self.released.wait(&mut state);
		}
		Ok(())
	}

	/// Releases one read hold of the calling thread.
	///
	/// Wakes every waiter once no owner holds a read lock any more.
	pub fn release_read(&self) -> Result<(), LockError> {
		let owner = OwnerToken::current();
		let emptied = self.state.lock().release_read(owner)?;
		if emptied {
			self.released.notify_all();
		}
		Ok(())
	}

	/// Releases one write hold of the calling thread.
	///
	/// The caller keeps any read holds it took while writing. Wakes every
	/// waiter once the writer slot is empty.
	pub fn release_write(&self) -> Result<(), LockError> {
		let owner = OwnerToken::current();
		let emptied = self.state.lock().release_write(owner)?;
		if emptied {
			self.released.notify_all();
		}
		Ok(())
	}

	/// Blocking read acquisition returning a guard that releases on drop.
	pub fn read(&self) -> ReadGuard<'_> {
		self.acquire_read();
		ReadGuard::new(self)
	}

	/// Blocking write acquisition returning a guard that releases on drop.
	pub fn write(&self) -> Result<WriteGuard<'_>, LockError> {
		self.acquire_write()?;
		Ok(WriteGuard::new(self))
	}

	/// Non-blocking [`Self::read`].
	pub fn try_read(&self) -> Option<ReadGuard<'_>> {
		self.try_acquire_read().then(|| ReadGuard::new(self))
	}

	/// Non-blocking [`Self::write`].
	pub fn try_write(&self) -> Option<WriteGuard<'_>> {
		self.try_acquire_write().then(|| WriteGuard::new(self))
	}
}

impl std::fmt::Debug for ReentrantRwLock {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.lock();
		f.debug_struct("ReentrantRwLock")
			.field("writer", &state.writer())
			.field("readers", &state.reader_count())
			.finish()
	}
}
