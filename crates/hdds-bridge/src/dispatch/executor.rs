// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Callback executor.
//!
//! A fixed pool of named worker threads fed by a bounded crossbeam channel.
//! Provider threads hand a job over and block until it has run, so the
//! provider observes listener calls as synchronous while caller code only
//! ever runs on bridge-owned threads.
//!
//! # Re-entrancy
//!
//! A job submitted from a worker runs inline on that worker. A callback that
//! calls back into the provider, which in turn dispatches another event, does
//! not wait on a queue it is itself draining.

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};

use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};

type Job = Box<dyn FnOnce() + Send + 'static>;

thread_local! {
    static ON_WORKER: Cell<bool> = const { Cell::new(false) };
}

pub struct CallbackExecutor {
    sender: Option<Sender<Job>>,
    workers: Vec<JoinHandle<()>>,
}

impl CallbackExecutor {
    /// Spawn `config.dispatch_workers` threads named `<thread_name>-<n>`.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        config.validate()?;
        let (sender, receiver) = channel::bounded::<Job>(config.queue_capacity);

        let mut executor = Self {
            sender: Some(sender),
            workers: Vec::with_capacity(config.dispatch_workers),
        };
        for index in 0..config.dispatch_workers {
            let receiver = receiver.clone();
            let handle = thread::Builder::new()
                .name(format!("{}-{}", config.thread_name, index))
                .spawn(move || worker_loop(receiver))
                .map_err(BridgeError::WorkerSpawn)?;
            executor.workers.push(handle);
        }

        log::debug!(
            "[hdds-bridge] executor started: {} worker(s), queue {}",
            config.dispatch_workers,
            config.queue_capacity
        );
        Ok(executor)
    }

    /// True on an executor worker thread.
    pub fn is_worker_thread() -> bool {
        ON_WORKER.with(Cell::get)
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Run `job` on a worker and wait for its result.
    ///
    /// Runs inline when already on a worker. A panicking job yields
    /// `CallbackPanicked`; the caller is released either way.
    pub fn run_blocking<F, R>(&self, job: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        if Self::is_worker_thread() {
            return guarded(job);
        }

        let sender = self.sender.as_ref().ok_or(BridgeError::ExecutorStopped)?;
        let (done_tx, done_rx) = channel::bounded::<Result<R>>(1);
        let wrapped: Job = Box::new(move || {
            // The submitter may have given up; nothing to report then.
            let _ = done_tx.send(guarded(job));
        });

        sender
            .send(wrapped)
            .map_err(|_| BridgeError::ExecutorStopped)?;
        done_rx.recv().map_err(|_| BridgeError::ExecutorStopped)?
    }
}

fn guarded<F, R>(job: F) -> Result<R>
where
    F: FnOnce() -> R,
{
    panic::catch_unwind(AssertUnwindSafe(job)).map_err(|_| {
        log::error!("[hdds-bridge] callback job panicked");
        BridgeError::CallbackPanicked
    })
}

fn worker_loop(receiver: Receiver<Job>) {
    ON_WORKER.with(|flag| flag.set(true));
    for job in receiver.iter() {
        job();
    }
    log::trace!(
        "[hdds-bridge] worker {:?} exiting",
        thread::current().name()
    );
}

impl Drop for CallbackExecutor {
    fn drop(&mut self) {
        // Closing the channel ends every worker loop once the queue drains.
        drop(self.sender.take());

        let current = thread::current().id();
        for handle in self.workers.drain(..) {
            // Dropped from inside a job: that worker exits on its own.
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                log::error!("[hdds-bridge] executor worker terminated abnormally");
            }
        }
    }
}
