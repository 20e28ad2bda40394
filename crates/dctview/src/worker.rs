//! Background reconstruction with last-request-wins semantics
//!
//! Requests are numbered in submission order. The worker skips queued
//! requests that a newer one has superseded, and results for anything but
//! the newest submission are dropped on receipt.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use dct_core::{DctResult, GreyImage};
use dct_transform::{BasisMatrix, CoefficientMask, ImageReconstructor, TileOrigin};
use tracing::{debug, trace};

/// Inputs of one reconstruction pass
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub image: Arc<GreyImage>,
    pub basis: Arc<BasisMatrix>,
    pub mask: CoefficientMask,
    pub origin: TileOrigin,
}

impl RenderRequest {
    /// Run the pass on the calling thread
    pub fn run(&self) -> DctResult<GreyImage> {
        ImageReconstructor::new(self.origin).reconstruct(&self.image, &self.basis, &self.mask)
    }
}

/// Result of a reconstruction pass, tagged with its request generation
#[derive(Debug)]
pub struct RenderOutcome {
    pub generation: u64,
    pub output: DctResult<GreyImage>,
}

/// Reconstruction thread fed through a channel
pub struct RenderWorker {
    requests: Option<Sender<(u64, RenderRequest)>>,
    results: Receiver<RenderOutcome>,
    handle: Option<JoinHandle<()>>,
    submitted: u64,
    completed: u64,
    latest: Option<RenderOutcome>,
}

impl RenderWorker {
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<(u64, RenderRequest)>();
        let (result_tx, result_rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            while let Ok(mut next) = request_rx.recv() {
                // Only the newest queued request is worth running
                while let Ok(newer) = request_rx.try_recv() {
                    trace!(generation = next.0, "skipping superseded request");
                    next = newer;
                }

                let (generation, request) = next;
                trace!(generation, "running render request");
                let outcome = RenderOutcome {
                    generation,
                    output: request.run(),
                };
                if result_tx.send(outcome).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: Some(request_tx),
            results: result_rx,
            handle: Some(handle),
            submitted: 0,
            completed: 0,
            latest: None,
        }
    }

    /// Queue a request, superseding every earlier one. Returns its generation.
    pub fn submit(&mut self, request: RenderRequest) -> u64 {
        self.submitted += 1;
        self.latest = None;
        let generation = self.submitted;
        if let Some(requests) = &self.requests {
            // A dead worker surfaces as `wait` returning `None`
            if let Err(err) = requests.send((generation, request)) {
                debug!(generation, "render worker has exited: {}", err);
            }
        }
        generation
    }

    /// Generation of the most recent submission
    pub fn submitted(&self) -> u64 {
        self.submitted
    }

    /// Non-blocking: the newest submission's result, if it has arrived
    pub fn poll(&mut self) -> Option<&RenderOutcome> {
        while let Ok(outcome) = self.results.try_recv() {
            self.accept(outcome);
        }
        self.latest.as_ref()
    }

    /// Block until the newest submission's result arrives
    ///
    /// Returns `None` if nothing is pending, the result was already taken, or
    /// the worker has exited.
    pub fn wait(&mut self) -> Option<&RenderOutcome> {
        while self.latest.is_none() {
            if self.completed == self.submitted {
                return None;
            }
            let outcome = self.results.recv().ok()?;
            self.accept(outcome);
        }
        self.latest.as_ref()
    }

    /// Take the newest submission's result out of the worker
    pub fn take(&mut self) -> Option<RenderOutcome> {
        self.poll();
        self.latest.take()
    }

    fn accept(&mut self, outcome: RenderOutcome) {
        if outcome.generation == self.submitted {
            self.completed = outcome.generation;
            self.latest = Some(outcome);
        } else {
            trace!(
                generation = outcome.generation,
                newest = self.submitted,
                "dropping stale render result"
            );
        }
    }
}

impl Default for RenderWorker {
    fn default() -> Self {
        Self::spawn()
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
