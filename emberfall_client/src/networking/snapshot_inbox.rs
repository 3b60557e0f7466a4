use emberfall_lib::rules::GameStateSnapshot;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

struct Slot {
    latest: Option<Arc<GameStateSnapshot>>,
    last_sequence: Option<u64>,
}

/// Producer half of the snapshot hand-off, held by the network read task.
pub struct SnapshotPost {
    slot: Arc<Mutex<Slot>>,
}

/// Consumer half, owned by the render loop.
///
/// A single-slot, latest-wins mailbox: the transport is at-least-once and
/// unordered, and diffing is defined only pairwise against the previous
/// snapshot, so anything but the newest pending snapshot is dead weight.
/// Posting overwrites, stale sequences are dropped, and the render loop
/// drains at most one snapshot per frame by construction.
pub struct SnapshotInbox {
    slot: Arc<Mutex<Slot>>,
}

pub fn snapshot_channel() -> (SnapshotPost, SnapshotInbox) {
    let slot = Arc::new(Mutex::new(Slot {
        latest: None,
        last_sequence: None,
    }));
    (
        SnapshotPost { slot: slot.clone() },
        SnapshotInbox { slot },
    )
}

impl SnapshotPost {
    /// Publishes a snapshot; returns whether it was accepted. Deliveries
    /// with a sequence at or below the newest one ever seen are stale
    /// duplicates and are dropped.
    pub fn post(&self, sequence: u64, snapshot: GameStateSnapshot) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.last_sequence.is_some_and(|last| sequence <= last) {
            debug!(sequence, "dropping stale snapshot delivery");
            return false;
        }
        slot.last_sequence = Some(sequence);
        slot.latest = Some(Arc::new(snapshot));
        true
    }
}

impl SnapshotInbox {
    /// Takes the newest pending snapshot, if any. Intermediate snapshots
    /// overwritten since the last take are gone by design.
    pub fn take_latest(&mut self) -> Option<Arc<GameStateSnapshot>> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.latest.take()
    }
}
