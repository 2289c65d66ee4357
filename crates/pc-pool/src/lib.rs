//! The cooperative worker pool and the parallel coloring drivers built
//! on top of it.
//!
//! [`WorkerPool`] is a bounded job queue guarded by a mutex with two
//! condition variables, grounded directly on a C11/pthreads thread-pool
//! implementation: one condvar wakes workers when a job arrives, the
//! other wakes `wait()` callers when the queue drains. The Rust
//! rendition uses [`std::thread::scope`] so jobs can borrow data owned
//! by the caller's stack frame (the shared plane graph, admissible
//! lists) instead of requiring `'static` closures and `Arc` everywhere;
//! the scope's own join-on-drop replaces the C version's explicit
//! `pthread_join` loop.

mod parallel;
mod pool;

pub use parallel::{color_parallel, ParallelColorError};
pub use pool::WorkerPool;
