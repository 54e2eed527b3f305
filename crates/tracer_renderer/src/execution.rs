//! Parallel execution platform for per-pixel work.

use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

/// Which execution platform a renderer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceSelection {
    /// Run every pixel on the calling thread
    HostOnly,
    /// A worker pool sized to the machine
    #[default]
    BestAvailable,
    /// A worker pool with exactly this many threads
    Threads(usize),
}

/// Failures of the execution platform.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Failed to start worker pool: {0}")]
    Build(#[from] ThreadPoolBuildError),

    #[error("Render worker panicked: {0}")]
    WorkerPanicked(String),
}

/// A live execution platform.
#[derive(Debug)]
pub enum ExecutionContext {
    Host,
    Pool(ThreadPool),
}

impl ExecutionContext {
    /// Bring up the platform for `selection`.
    pub fn new(selection: DeviceSelection) -> Result<Self, ExecutionError> {
        let context = match selection {
            DeviceSelection::HostOnly => Self::Host,
            DeviceSelection::BestAvailable => Self::Pool(ThreadPoolBuilder::new().build()?),
            DeviceSelection::Threads(threads) => {
                Self::Pool(ThreadPoolBuilder::new().num_threads(threads).build()?)
            }
        };
        log::debug!(
            "Selected {} ({} worker{})",
            context.name(),
            context.worker_count(),
            if context.worker_count() == 1 { "" } else { "s" }
        );
        Ok(context)
    }

    /// Human-readable platform name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::Pool(_) => "cpu thread pool",
        }
    }

    /// Number of threads that run kernels.
    pub fn worker_count(&self) -> usize {
        match self {
            Self::Host => 1,
            Self::Pool(pool) => pool.current_num_threads(),
        }
    }

    /// Fill every slot with `kernel(index)`.
    ///
    /// Each slot is written by exactly one kernel invocation. If any
    /// invocation panics the whole dispatch fails and the slot contents
    /// are unspecified.
    pub fn dispatch<T, F>(&self, slots: &mut [T], kernel: F) -> Result<(), ExecutionError>
    where
        T: Send,
        F: Fn(usize) -> T + Sync,
    {
        let run = AssertUnwindSafe(|| match self {
            Self::Host => {
                for (index, slot) in slots.iter_mut().enumerate() {
                    *slot = kernel(index);
                }
            }
            Self::Pool(pool) => pool.install(|| {
                slots
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(index, slot)| *slot = kernel(index));
            }),
        });

        panic::catch_unwind(run).map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            ExecutionError::WorkerPanicked(message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_context() {
        let context = ExecutionContext::new(DeviceSelection::HostOnly).unwrap();
        assert_eq!(context.name(), "host");
        assert_eq!(context.worker_count(), 1);
    }

    #[test]
    fn test_thread_count() {
        let context = ExecutionContext::new(DeviceSelection::Threads(3)).unwrap();
        assert_eq!(context.worker_count(), 3);
    }

    #[test]
    fn test_dispatch_fills_every_slot() {
        for selection in [
            DeviceSelection::HostOnly,
            DeviceSelection::Threads(4),
            DeviceSelection::BestAvailable,
        ] {
            let context = ExecutionContext::new(selection).unwrap();
            let mut slots = vec![0usize; 1000];
            context.dispatch(&mut slots, |i| i * i).unwrap();
            assert!(slots.iter().enumerate().all(|(i, &v)| v == i * i));
        }
    }

    #[test]
    fn test_dispatch_empty() {
        let context = ExecutionContext::new(DeviceSelection::Threads(2)).unwrap();
        let mut slots: Vec<u8> = Vec::new();
        assert!(context.dispatch(&mut slots, |_| 1).is_ok());
    }

    #[test]
    fn test_panicking_kernel_is_an_error() {
        for selection in [DeviceSelection::HostOnly, DeviceSelection::Threads(2)] {
            let context = ExecutionContext::new(selection).unwrap();
            let mut slots = vec![0u32; 64];
            let result = context.dispatch(&mut slots, |i| {
                if i == 37 {
                    panic!("bad pixel {i}");
                }
                i as u32
            });

            match result {
                Err(ExecutionError::WorkerPanicked(message)) => {
                    assert!(message.contains("bad pixel 37"), "{message}");
                }
                other => panic!("expected a worker panic, got {other:?}"),
            }
        }
    }
}
