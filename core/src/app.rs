//! The display loop tying pipeline, sink and platform together.

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::config::Config;
use crate::pipeline::Acquire;
use crate::sink::FrameSink;

/// Reports the platform's free heap. The loop only reads it; whatever
/// supervises the process performs the actual restart.
pub trait SystemMonitor {
    fn free_memory(&mut self) -> usize;
}

/// What the caller should do after one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Keep looping.
    Continue,
    /// Free memory fell below the configured floor; the supervisor
    /// should restart the process.
    Restart,
}

/// One frame per iteration: acquire, render, sleep.
pub struct Application<A, T, M> {
    pipeline: A,
    delay: T,
    monitor: M,
    config: Config,
}

impl<A, T, M> Application<A, T, M>
where
    A: Acquire,
    T: DelayNs,
    M: SystemMonitor,
{
    pub fn new(pipeline: A, delay: T, monitor: M, config: Config) -> Self {
        Application {
            pipeline,
            delay,
            monitor,
            config,
        }
    }

    /// One acquire-render-sleep cycle.
    ///
    /// Checks the free-memory floor first; below it, returns
    /// [`LoopControl::Restart`] without touching the network. The frame
    /// is rendered exactly once and dropped before the next cycle.
    pub fn run_once(&mut self, sink: &mut impl FrameSink) -> LoopControl {
        let free = self.monitor.free_memory();
        debug!("free memory: {free} bytes");
        if free < self.config.min_free_ram {
            warn!(
                "free memory below floor ({free} < {}), requesting restart",
                self.config.min_free_ram
            );
            return LoopControl::Restart;
        }

        let frame = self.pipeline.acquire();
        sink.show(&frame);
        self.delay.delay_ms(self.config.frame_duration_ms);
        LoopControl::Continue
    }

    /// Loop until the platform needs a restart.
    pub fn run(&mut self, sink: &mut impl FrameSink) {
        while self.run_once(sink) == LoopControl::Continue {}
    }
}
