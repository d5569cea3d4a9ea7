//! Non-overlapping decode dispatch for a stream of frames.
//!
//! A [`FrameScanner`] keeps at most one decode in flight. Each accepted
//! frame gets a new request id and its own channel; the decode runs on the
//! rayon pool and sends its result back over that channel. Cancelling or
//! resubmitting drops the receiver, so a late result has nowhere to land.

use crate::config::DecodeOptions;
use crate::error::DecodeError;
use crate::models::{Frame, QRCode};
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// Monotonic id of a dispatched frame
pub type RequestId = u64;

/// Outcome of one frame decode
pub type ScanResult = Result<Option<QRCode>, DecodeError>;

/// Dispatches frames to background decodes, one at a time
pub struct FrameScanner {
    options: DecodeOptions,
    last_request: RequestId,
    pending: Option<(RequestId, Receiver<ScanResult>)>,
}

impl FrameScanner {
    /// Scanner decoding with `options`
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            last_request: 0,
            pending: None,
        }
    }

    /// Whether a decode is outstanding
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Id of the most recently dispatched frame, 0 before the first
    pub fn last_request(&self) -> RequestId {
        self.last_request
    }

    /// Start decoding `frame` in the background.
    ///
    /// Returns the request id, or `None` (dropping the frame) while a
    /// previous decode is still outstanding.
    pub fn submit(&mut self, frame: Frame) -> Option<RequestId> {
        if self.is_busy() {
            log::trace!("scanner busy with request {}, frame dropped", self.last_request);
            return None;
        }

        self.last_request += 1;
        let id = self.last_request;
        // The worker holds the only sender
        let (sender, receiver) = mpsc::channel();
        self.pending = Some((id, receiver));

        let options = self.options;
        rayon::spawn(move || {
            let result = crate::decode_image_owned(frame.pixels, frame.width, frame.height, &options);
            // The request may have been cancelled in the meantime
            let _ = sender.send(result);
        });
        Some(id)
    }

    /// Forget the outstanding decode. Its result is discarded when it
    /// arrives and the next frame can be submitted right away.
    pub fn cancel(&mut self) {
        if let Some((id, _)) = self.pending.take() {
            log::trace!("request {} cancelled", id);
        }
    }

    /// Return the result of the outstanding decode if it has finished
    pub fn poll(&mut self) -> Option<(RequestId, ScanResult)> {
        let (id, receiver) = self.pending.as_ref()?;
        let id = *id;
        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(DecodeError::WorkerLost),
        };
        self.pending = None;
        Some((id, result))
    }

    /// Block until the outstanding decode finishes. `None` when nothing is
    /// outstanding.
    pub fn wait(&mut self) -> Option<(RequestId, ScanResult)> {
        let (id, receiver) = self.pending.take()?;
        let result = receiver.recv().unwrap_or(Err(DecodeError::WorkerLost));
        Some((id, result))
    }
}

impl Default for FrameScanner {
    fn default() -> Self {
        Self::new(DecodeOptions::default())
    }
}
