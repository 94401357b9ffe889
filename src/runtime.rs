//! Async runtime management for blocking callers
//!
//! The HTTP stack is async, while every public operation blocks its calling
//! thread. Each transport owns one multi-threaded Tokio runtime and drives
//! requests to completion through [`BlockingRuntime::block_on`], which may be
//! called from any number of threads at once.

use std::future::Future;
use tokio::runtime::{Builder, Runtime};

use crate::error::{Error, ErrorCode, Result};

/// Owned Tokio runtime used to execute requests synchronously
#[derive(Debug)]
pub struct BlockingRuntime {
    runtime: Runtime,
}

impl BlockingRuntime {
    /// Build a multi-threaded runtime with I/O and time drivers enabled
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .enable_all()
            .thread_name("groupme-io")
            .build()
            .map_err(|e| Error::new(ErrorCode::Unknown, format!("Failed to create Tokio runtime: {e}")))?;

        Ok(Self { runtime })
    }

    /// Execute an async future synchronously
    ///
    /// Blocks the current thread until the future completes.
    ///
    /// # Panics
    /// Panics if called from within an async execution context.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_block_on() {
        let runtime = BlockingRuntime::new().expect("Failed to initialize runtime");
        let result = runtime.block_on(async { 42 });
        assert_eq!(result, 42);
    }

    #[test]
    fn test_block_on_from_many_threads() {
        let runtime = Arc::new(BlockingRuntime::new().expect("Failed to initialize runtime"));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let runtime = Arc::clone(&runtime);
                std::thread::spawn(move || runtime.block_on(async move { i * 2 }))
            })
            .collect();

        let results: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![0, 2, 4, 6, 8, 10, 12, 14]);
    }
}
