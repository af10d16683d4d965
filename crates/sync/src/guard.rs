use std::marker::PhantomData;

use crate::lock::ReentrantRwLock;

/// Read hold released on drop.
///
/// `!Send`: the hold belongs to the thread that took it.
#[must_use = "dropping the guard releases the read lock immediately"]
pub struct ReadGuard<'a> {
	lock: &'a ReentrantRwLock,
	_owner: PhantomData<*const ()>,
}

/// Write hold released on drop.
///
/// `!Send`: the hold belongs to the thread that took it.
#[must_use = "dropping the guard releases the write lock immediately"]
pub struct WriteGuard<'a> {
	lock: &'a ReentrantRwLock,
	_owner: PhantomData<*const ()>,
}

impl<'a> ReadGuard<'a> {
	pub(crate) fn new(lock: &'a ReentrantRwLock) -> Self {
		Self { lock, _owner: PhantomData }
	}
}

impl<'a> WriteGuard<'a> {
	pub(crate) fn new(lock: &'a ReentrantRwLock) -> Self {
		Self { lock, _owner: PhantomData }
	}
}

impl Drop for ReadGuard<'_> {
	fn drop(&mut self) {
		if let Err(err) = self.lock.release_read() {
			tracing::error!(%err, "sync.guard.release_read");
		}
	}
}

impl Drop for WriteGuard<'_> {
	fn drop(&mut self) {
		if let Err(err) = self.lock.release_write() {
			tracing::error!(%err, "sync.guard.release_write");
		}
	}
}

impl std::fmt::Debug for ReadGuard<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ReadGuard").finish_non_exhaustive()
	}
}

impl std::fmt::Debug for WriteGuard<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WriteGuard").finish_non_exhaustive()
	}
}
