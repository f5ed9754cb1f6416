extern crate std;

use std::vec::Vec;

/// Delay that returns immediately and remembers what it was asked to wait.
#[derive(Default)]
pub(crate) struct RecordingDelay {
    pub(crate) ms: Vec<u32>,
    pub(crate) ns: u64,
}

impl RecordingDelay {
    pub(crate) fn total_ms(&self) -> u32 {
        self.ms.iter().sum()
    }
}

impl embedded_hal::delay::DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
    }
}

#[cfg(feature = "async")]
impl embedded_hal_async::delay::DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.ns += u64::from(ns);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
    }
}
