//! Progress counter for records written (total unknown up front).

use kdam::{Animation, Bar, BarExt};

use crate::utils::config::OutputDefaults;

/// Counter without a total, refreshed every few records to keep stderr quiet.
pub struct RecordCounter {
    bar: Bar,
    pending: usize,
}

impl RecordCounter {
    pub fn new(desc: &'static str, unit: &'static str) -> Self {
        let bar = kdam::tqdm!(
            total = 0,
            desc = desc,
            animation = Animation::Classic,
            position = 0,
            unit = unit
        );
        Self { bar, pending: 0 }
    }

    pub fn tick(&mut self) {
        self.pending += 1;
        if self.pending >= OutputDefaults::PROGRESS_UPDATE_BATCH_SIZE {
            self.flush();
        }
    }

    pub fn flush(&mut self) {
        if self.pending > 0 {
            let _ = self.bar.update(self.pending);
            self.pending = 0;
        }
    }

    /// Push the remaining count and end the line.
    pub fn finish(mut self) {
        self.flush();
        let _ = self.bar.refresh();
        eprintln!();
    }
}
