use std::thread::{self, ThreadId};

/// Opaque identity of the execution context holding a lock.
///
/// Tokens compare equal for the whole lifetime of one thread. Work that
/// hops threads between acquire and release must not rely on the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerToken(ThreadId);

impl OwnerToken {
	/// Returns the token of the calling thread.
	pub fn current() -> Self {
		Self(thread::current().id())
	}
}

impl From<ThreadId> for OwnerToken {
	fn from(id: ThreadId) -> Self {
		Self(id)
	}
}
