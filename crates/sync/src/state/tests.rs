use proptest::prelude::*;

use super::*;

const A: u8 = 1;
const B: u8 = 2;
const C: u8 = 3;

#[test]
fn readers_share_without_writer() {
	let mut state = LockState::<u8>::new();
	assert!(state.try_read(A));
	assert!(state.try_read(B));
	assert!(state.try_read(A));
	assert_eq!(state.read_count(A), 2);
	assert_eq!(state.read_count(B), 1);
	assert_eq!(state.reader_count(), 2);
	assert!(state.invariants_hold());
}

#[test]
fn nested_write_blocks_others_until_fully_released() {
	let mut state = LockState::<u8>::new();
	assert!(state.try_write(A));
	assert!(state.try_write(A));
	assert!(!state.try_write(B));
	assert!(!state.try_read(B));

	assert_eq!(state.release_write(A), Ok(false));
	assert_eq!(state.write_count(A), 1);
	assert!(!state.try_write(B));

	assert_eq!(state.release_write(A), Ok(true));
	assert!(state.try_write(B));
	assert_eq!(state.writer(), Some(B));
}

#[test]
fn writer_may_take_reads() {
	let mut state = LockState::<u8>::new();
	assert!(state.try_write(A));
	assert!(state.try_read(A));
	assert!(state.try_read(A));
	assert_eq!(state.read_count(A), 2);

	assert_eq!(state.release_write(A), Ok(true));
	// Writer slot emptied while A still reads: others may read now.
	assert!(state.try_read(B));
	assert!(!state.try_write(C));
	assert!(state.invariants_hold());
}

#[test]
fn reader_cannot_become_writer() {
	let mut state = LockState::<u8>::new();
	assert!(state.try_read(A));
	assert!(state.is_upgrade(A));
	assert!(!state.try_write(A));
	assert_eq!(state.write_count(A), 0);
	assert_eq!(state.read_count(A), 1);
}

#[test]
fn active_readers_keep_new_writer_out() {
	let mut state = LockState::<u8>::new();
	assert!(state.try_read(A));
	assert!(!state.try_write(B));
	assert_eq!(state.release_read(A), Ok(true));
	assert!(state.try_write(B));
}

#[test]
fn release_without_hold_is_rejected() {
	let mut state = LockState::<u8>::new();
	assert_eq!(state.release_read(A), Err(LockError::NotHeld { kind: HoldKind::Read }));
	assert_eq!(state.release_write(A), Err(LockError::NotHeld { kind: HoldKind::Write }));

	assert!(state.try_write(A));
	assert_eq!(state.release_write(B), Err(LockError::NotHeld { kind: HoldKind::Write }));
	assert_eq!(state.write_count(A), 1);
}

#[test]
fn release_read_reports_empty_only_for_last_reader() {
	let mut state = LockState::<u8>::new();
	assert!(state.try_read(A));
	assert!(state.try_read(B));
	assert_eq!(state.release_read(A), Ok(false));
	assert_eq!(state.release_read(B), Ok(true));
	assert!(state.is_free());
}

#[derive(Debug, Clone, Copy)]
enum Op {
	TryRead(u8),
	TryWrite(u8),
	ReleaseRead(u8),
	ReleaseWrite(u8),
}

fn arb_op() -> impl Strategy<Value = Op> {
	(0u8..4, 0u8..4).prop_map(|(kind, owner)| match kind {
		0 => Op::TryRead(owner),
		1 => Op::TryWrite(owner),
		2 => Op::ReleaseRead(owner),
		_ => Op::ReleaseWrite(owner),
	})
}

proptest! {
	/// Arbitrary interleavings never break single-writer exclusivity or
	/// leave zero-count entries behind.
	#[test]
	fn prop_invariants_survive_any_sequence(ops in prop::collection::vec(arb_op(), 0..200)) {
		let mut state = LockState::<u8>::new();
		let mut held_reads = [0usize; 4];
		let mut held_writes = [0usize; 4];

		for op in ops {
			match op {
				Op::TryRead(o) => {
					if state.try_read(o) {
						held_reads[o as usize] += 1;
					}
				}
				Op::TryWrite(o) => {
					if state.try_write(o) {
						held_writes[o as usize] += 1;
					}
				}
				Op::ReleaseRead(o) => {
					let res = state.release_read(o);
					prop_assert_eq!(res.is_ok(), held_reads[o as usize] > 0);
					if res.is_ok() {
						held_reads[o as usize] -= 1;
					}
				}
				Op::ReleaseWrite(o) => {
					let res = state.release_write(o);
					prop_assert_eq!(res.is_ok(), held_writes[o as usize] > 0);
					if res.is_ok() {
						held_writes[o as usize] -= 1;
					}
				}
			}

			prop_assert!(state.invariants_hold());
			for o in 0..4u8 {
				prop_assert_eq!(state.read_count(o), held_reads[o as usize]);
				prop_assert_eq!(state.write_count(o), held_writes[o as usize]);
			}
			prop_assert!(held_writes.iter().filter(|&&n| n > 0).count() <= 1);
		}
	}

	/// With no writer ever involved, every read attempt succeeds.
	#[test]
	fn prop_reads_always_succeed_without_writer(owners in prop::collection::vec(0u8..8, 1..64)) {
		let mut state = LockState::<u8>::new();
		let mut expected = [0usize; 8];
		for o in owners {
			prop_assert!(state.try_read(o));
			expected[o as usize] += 1;
		}
		for o in 0..8u8 {
			prop_assert_eq!(state.read_count(o), expected[o as usize]);
		}
	}
}
