use tokio::sync::oneshot;
use tracing::debug;

use crate::core::KsefError;

type PdfResult = Result<Vec<u8>, KsefError>;

/// Pending output of a renderer.
///
/// A handle resolves exactly once, through [`PdfHandle::get_buffer`].
#[derive(Debug)]
pub struct PdfHandle {
    rx: oneshot::Receiver<PdfResult>,
}

/// Completion side of a [`PdfHandle`], held by the renderer.
///
/// Dropping the sender without calling [`PdfSender::send`] fails the handle.
#[derive(Debug)]
pub struct PdfSender {
    tx: oneshot::Sender<PdfResult>,
}

impl PdfHandle {
    /// A connected sender/handle pair for renderers that finish later.
    pub fn channel() -> (PdfSender, PdfHandle) {
        let (tx, rx) = oneshot::channel();
        (PdfSender { tx }, PdfHandle { rx })
    }

    /// A handle that is already resolved with `result`.
    pub fn from_result(result: PdfResult) -> Self {
        let (sender, handle) = Self::channel();
        sender.send(result);
        handle
    }

    /// A handle already resolved with `bytes`.
    pub fn ready(bytes: Vec<u8>) -> Self {
        Self::from_result(Ok(bytes))
    }

    /// A handle already failed with `error`.
    pub fn failed(error: KsefError) -> Self {
        Self::from_result(Err(error))
    }

    /// Wait for the renderer and take the finished PDF.
    pub async fn get_buffer(self) -> PdfResult {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(KsefError::Render(
                "renderer finished without producing a document".into(),
            )),
        }
    }
}

impl PdfSender {
    /// Resolve the paired handle.
    pub fn send(self, result: PdfResult) {
        if self.tx.send(result).is_err() {
            debug!("PDF handle dropped before the renderer finished");
        }
    }
}
