//! Frame dispatch onto a dedicated comparison worker.
//!
//! The camera side produces frames faster than comparison may run. Frames are
//! handed over through a bounded channel with a single slot; when the slot is
//! taken the new frame is dropped instead of queued, so latency never builds
//! up. The worker thread is the only owner of the [`Session`].

use crate::{frame::Frame, session::Session, session::SessionUpdate, Error, Result};
use log::{debug, trace};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

/// Single-worker, drop-when-busy frame dispatcher
pub struct FrameDispatcher {
    input: Option<SyncSender<Frame>>,
    updates: Receiver<SessionUpdate>,
    worker: Option<JoinHandle<Session>>,
    dropped: usize,
}

impl FrameDispatcher {
    /// Move `session` onto a new worker thread
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned
    pub fn spawn(mut session: Session) -> Result<Self> {
        let (input, frames) = mpsc::sync_channel::<Frame>(1);
        let (publish, updates) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("motion-coach-worker".to_string())
            .spawn(move || {
                for frame in frames {
                    if publish.send(session.process(&frame)).is_err() {
                        break;
                    }
                }
                session
            })?;

        debug!("Comparison worker started");
        Ok(Self {
            input: Some(input),
            updates,
            worker: Some(worker),
            dropped: 0,
        })
    }

    /// Offer a frame to the worker; returns `false` if it was dropped
    pub fn submit(&mut self, frame: Frame) -> bool {
        let Some(input) = &self.input else {
            return false;
        };
        match input.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                trace!("Worker busy, dropped frame ({} so far)", self.dropped);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Next published update, if one is ready
    #[must_use]
    pub fn try_recv_update(&self) -> Option<SessionUpdate> {
        self.updates.try_recv().ok()
    }

    /// Wait for the next published update; `None` once the worker has stopped
    #[must_use]
    pub fn recv_update(&self) -> Option<SessionUpdate> {
        self.updates.recv().ok()
    }

    /// Frames rejected because the worker was busy
    #[must_use]
    pub fn dropped_frames(&self) -> usize {
        self.dropped
    }

    /// Stop accepting frames, wait for the worker and take the session back
    ///
    /// Frames already handed over are processed first; their updates stay
    /// unread.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError` if the worker panicked
    pub fn finish(mut self) -> Result<Session> {
        drop(self.input.take());
        let worker = self
            .worker
            .take()
            .ok_or_else(|| Error::DispatchError("Worker already joined".to_string()))?;
        let session = worker
            .join()
            .map_err(|_| Error::DispatchError("Comparison worker panicked".to_string()))?;
        debug!("Comparison worker stopped, {} frames dropped", self.dropped);
        Ok(session)
    }
}
