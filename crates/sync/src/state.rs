use std::collections::HashMap;
use std::hash::Hash;

use crate::OwnerToken;
use crate::error::{HoldKind, LockError};

#[cfg(test)]
mod tests;

/// Hold bookkeeping behind [`crate::ReentrantRwLock`].
///
/// Pure state machine: no blocking, no waking. Every method takes the owner
/// explicitly so the rules can be exercised without threads.
///
/// Invariants kept after every call:
/// * at most one owner has write holds (`writer` is a single slot),
/// * while a writer exists, every reader entry belongs to that writer,
/// * present counts are positive; reaching zero removes the entry.
#[derive(Debug, Clone)]
pub struct LockState<O = OwnerToken> {
	readers: HashMap<O, usize>,
	writer: Option<(O, usize)>,
}

impl<O> Default for LockState<O> {
	fn default() -> Self {
		Self {
			readers: HashMap::new(),
			writer: None,
		}
	}
}

impl<O> LockState<O>
where
	O: Copy + Eq + Hash,
{
	/// Empty state: no readers, no writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Read holds of `owner`.
	pub fn read_count(&self, owner: O) -> usize {
		self.readers.get(&owner).copied().unwrap_or(0)
	}

	/// Write holds of `owner`.
	pub fn write_count(&self, owner: O) -> usize {
		match self.writer {
			Some((writer, count)) if writer == owner => count,
			_ => 0,
		}
	}

	/// Current writer, if any.
	pub fn writer(&self) -> Option<O> {
		self.writer.map(|(writer, _)| writer)
	}

	/// Number of distinct owners holding read locks.
	pub fn reader_count(&self) -> usize {
		self.readers.len()
	}

	/// True when nobody holds the lock in either mode.
	pub fn is_free(&self) -> bool {
		self.writer.is_none() && self.readers.is_empty()
	}

	/// True when `owner` holds reads but no write, i.e. a write attempt
	/// would be an upgrade.
	pub fn is_upgrade(&self, owner: O) -> bool {
		self.write_count(owner) == 0 && self.read_count(owner) > 0
	}

	/// Takes a read hold if nobody else writes.
	pub fn try_read(&mut self, owner: O) -> bool {
		match self.writer {
			Some((writer, _)) if writer != owner => false,
			_ => {
				*self.readers.entry(owner).or_insert(0) += 1;
				true
			}
		}
	}

	/// Takes a write hold if the lock is free or `owner` already writes.
	///
	/// Fails while any reader exists and nobody writes, the caller's own
	/// read holds included.
	pub fn try_write(&mut self, owner: O) -> bool {
		if let Some((writer, count)) = &mut self.writer {
			if *writer != owner {
				return false;
			}
			*count += 1;
			return true;
		}
		if !self.readers.is_empty() {
			return false;
		}
		self.writer = Some((owner, 1));
		true
	}

	/// Drops one read hold. Returns `true` when the reader set became empty.
	pub fn release_read(&mut self, owner: O) -> Result<bool, LockError> {
		let Some(count) = self.readers.get_mut(&owner) else {
			return Err(LockError::NotHeld { kind: HoldKind::Read });
		};
		*count -= 1;
		if *count > 0 {
			return Ok(false);
		}
		self.readers.remove(&owner);
		Ok(self.readers.is_empty())
	}

	/// Drops one write hold. Returns `true` when the writer slot became empty.
	pub fn release_write(&mut self, owner: O) -> Result<bool, LockError> {
		let remaining = match &mut self.writer {
			Some((writer, count)) if *writer == owner => {
				*count -= 1;
				*count
			}
			_ => return Err(LockError::NotHeld { kind: HoldKind::Write }),
		};
		if remaining > 0 {
			return Ok(false);
		}
		self.writer = None;
		Ok(true)
	}

	/// Checks the structural invariants. Used by tests.
	pub fn invariants_hold(&self) -> bool {
		if self.readers.values().any(|&count| count == 0) {
			return false;
		}
		match self.writer {
			Some((_, 0)) => false,
			Some((writer, _)) => self.readers.keys().all(|&reader| reader == writer),
			None => true,
		}
	}
}
