//! A bounded FIFO job queue shared by a fixed set of scoped worker
//! threads, guarded by a single mutex with two condition variables.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

type Job<'scope> = Box<dyn FnOnce() + Send + 'scope>;

struct Queue<'scope> {
    jobs: VecDeque<Job<'scope>>,
    jobs_in_progress: usize,
    shutdown: bool,
}

struct Shared<'scope> {
    queue: Mutex<Queue<'scope>>,
    job_ready: Condvar,
    drained: Condvar,
}

/// A pool of worker threads spawned into a [`std::thread::Scope`],
/// pulling closures from a shared queue. Because the threads are
/// scoped rather than `'static`, jobs may borrow data owned by the
/// caller's stack frame (a plane graph, a slice of admissible lists)
/// without `Arc`-wrapping it first; the scope itself joins every
/// worker when it exits, so there is no explicit join loop to write.
pub struct WorkerPool<'scope> {
    shared: Arc<Shared<'scope>>,
}

impl<'scope> WorkerPool<'scope> {
    /// Spawns `num_workers` threads into `scope`, each looping on the
    /// shared queue until [`WorkerPool::halt_and_destroy`] is called.
    pub fn new<'env>(scope: &'scope thread::Scope<'scope, 'env>, num_workers: usize) -> Self {
        let shared = Arc::new(Shared {
            queue: Mutex::new(Queue { jobs: VecDeque::new(), jobs_in_progress: 0, shutdown: false }),
            job_ready: Condvar::new(),
            drained: Condvar::new(),
        });
        for _ in 0..num_workers.max(1) {
            let shared = Arc::clone(&shared);
            scope.spawn(move || worker_loop(&shared));
        }
        WorkerPool { shared }
    }

    /// Enqueues one job. Wakes exactly one idle worker.
    pub fn submit(&self, job: Job<'scope>) {
        let mut q = self.shared.queue.lock().unwrap();
        q.jobs.push_back(job);
        self.shared.job_ready.notify_one();
    }

    /// Enqueues a batch of independent jobs built from `items`, one per
    /// element, under a single lock acquisition.
    pub fn submit_slice<T, F>(&self, items: &[T], mut make_job: F)
    where
        T: Sync,
        F: FnMut(&T) -> Job<'scope>,
    {
        let mut q = self.shared.queue.lock().unwrap();
        for item in items {
            q.jobs.push_back(make_job(item));
        }
        self.shared.job_ready.notify_all();
    }

    /// Blocks until the queue is empty and no worker is mid-job.
    pub fn wait(&self) {
        let q = self.shared.queue.lock().unwrap();
        let _guard = self
            .shared
            .drained
            .wait_while(q, |q| !q.jobs.is_empty() || q.jobs_in_progress > 0)
            .unwrap();
    }

    /// Signals every worker to exit its loop once its current job (if
    /// any) finishes and the queue is empty. Any jobs still queued at
    /// the moment of the call are discarded: workers stop taking new
    /// work but let in-flight work finish. Actual thread teardown
    /// happens when the enclosing `thread::scope` returns.
    pub fn halt_and_destroy(self) {
        let mut q = self.shared.queue.lock().unwrap();
        q.shutdown = true;
        q.jobs.clear();
        self.shared.job_ready.notify_all();
    }
}

fn worker_loop(shared: &Shared<'_>) {
    loop {
        let mut q = shared.queue.lock().unwrap();
        q = shared.job_ready.wait_while(q, |q| q.jobs.is_empty() && !q.shutdown).unwrap();
        let Some(job) = q.jobs.pop_front() else {
            // Queue empty and shutdown requested: nothing left to run.
            return;
        };
        q.jobs_in_progress += 1;
        drop(q);

        job();

        let mut q = shared.queue.lock().unwrap();
        q.jobs_in_progress -= 1;
        if q.jobs.is_empty() && q.jobs_in_progress == 0 {
            shared.drained.notify_all();
        }
        let should_exit = q.shutdown && q.jobs.is_empty();
        drop(q);
        if should_exit {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn submitted_jobs_all_run() {
        let counter = AtomicUsize::new(0);
        thread::scope(|scope| {
            let pool = WorkerPool::new(scope, 4);
            for _ in 0..100 {
                pool.submit(Box::new(|| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }));
            }
            pool.wait();
            pool.halt_and_destroy();
        });
        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn submit_slice_runs_one_job_per_item() {
        let items: Vec<i32> = (0..50).collect();
        let sum = std::sync::atomic::AtomicI64::new(0);
        thread::scope(|scope| {
            let pool = WorkerPool::new(scope, 3);
            pool.submit_slice(&items, |&item| {
                Box::new(move || {
                    sum.fetch_add(item as i64, Ordering::SeqCst);
                })
            });
            pool.wait();
            pool.halt_and_destroy();
        });
        assert_eq!(sum.load(Ordering::SeqCst), items.iter().map(|&x| x as i64).sum::<i64>());
    }
}
