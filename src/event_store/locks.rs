//! Per-record write serialization
//!
//! Writers to the same id take the same stripe, so update and delete on
//! one record never interleave. Different ids usually land on different
//! stripes and proceed in parallel.

use parking_lot::{Mutex, MutexGuard};

const STRIPES: usize = 64;

pub(crate) struct RecordLocks {
    stripes: Vec<Mutex<()>>,
}

impl RecordLocks {
    pub(crate) fn new() -> Self {
        Self {
            stripes: (0..STRIPES).map(|_| Mutex::new(())).collect(),
        }
    }

    /// Hold the returned guard for the whole read-modify-write
    pub(crate) fn lock(&self, id: u64) -> MutexGuard<'_, ()> {
        self.stripes[(id % STRIPES as u64) as usize].lock()
    }
}
