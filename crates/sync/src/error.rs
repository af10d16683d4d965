//! Lock misuse errors.

use thiserror::Error;

/// Which half of the lock an operation targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoldKind {
	Read,
	Write,
}

impl HoldKind {
	pub(crate) const fn as_str(self) -> &'static str {
		match self {
			Self::Read => "read",
			Self::Write => "write",
		}
	}
}

impl std::fmt::Display for HoldKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Errors raised when the lock is used outside its reentrancy rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LockError {
	/// The caller holds read locks only and asked to block for the write lock.
	///
	/// Its own read hold keeps the reader set non-empty, so the wait could
	/// never finish.
	#[error("upgrade not supported: owner holds {reads} read lock(s) and no write lock")]
	UpgradeNotSupported {
		/// Read holds the caller had at the time of the attempt.
		reads: usize,
	},

	/// The caller released a lock it does not hold.
	#[error("{kind} lock released by an owner that does not hold it")]
	NotHeld {
		/// Half of the lock that was released.
		kind: HoldKind,
	},
}
