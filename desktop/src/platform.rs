use std::thread;
use std::time::Duration;

use catmatrix_core::app::SystemMonitor;
use embedded_hal::delay::DelayNs;

/// `thread::sleep`-backed delay for the host build.
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns.into()));
    }
}

/// Host stand-in for the appliance's free-heap probe. Desktops have no
/// 35 kB ceiling, so the reading never trips the restart floor.
pub struct HostMonitor;

impl SystemMonitor for HostMonitor {
    fn free_memory(&mut self) -> usize {
        usize::MAX
    }
}
