//! Timer-driven note auto-save.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use studymate_core::Result;

use crate::endpoints::SavedNote;
use crate::provider::SessionProvider;

/// Destination for note saves.
///
/// The seam exists so the auto-saver can be exercised without a backend.
#[async_trait]
pub trait NoteSink: Send + Sync {
    /// Persist the note content for a document.
    async fn save_note(&self, pdf_id: u64, content: &str) -> Result<SavedNote>;
}

#[async_trait]
impl NoteSink for SessionProvider {
    async fn save_note(&self, pdf_id: u64, content: &str) -> Result<SavedNote> {
        SessionProvider::save_note(self, pdf_id, content).await
    }
}

#[derive(Default)]
struct Buffer {
    content: String,
    dirty: bool,
}

/// Periodically saves staged note content while it keeps changing.
///
/// A single task ticks on a fixed interval (the product default is 30
/// seconds) and pushes the buffer when it is dirty. Saves never overlap.
/// A failed save is logged, swallowed, and retried on the next tick; the
/// staged content is not lost.
pub struct NoteAutosaver {
    buffer: Arc<Mutex<Buffer>>,
    sink: Arc<dyn NoteSink>,
    pdf_id: u64,
    handle: JoinHandle<()>,
}

impl NoteAutosaver {
    /// Spawn the save loop for one document.
    pub fn spawn(sink: Arc<dyn NoteSink>, pdf_id: u64, interval: Duration) -> Self {
        let buffer = Arc::new(Mutex::new(Buffer::default()));

        let task_buffer = Arc::clone(&buffer);
        let task_sink = Arc::clone(&sink);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // interval's first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let staged = {
                    let mut buf = task_buffer.lock().unwrap();
                    if buf.dirty {
                        buf.dirty = false;
                        Some(buf.content.clone())
                    } else {
                        None
                    }
                };

                let Some(content) = staged else { continue };

                match task_sink.save_note(pdf_id, &content).await {
                    Ok(_) => debug!(pdf_id, "auto-saved note"),
                    Err(error) => {
                        warn!(%error, pdf_id, "auto-save failed, will retry next tick");
                        task_buffer.lock().unwrap().dirty = true;
                    }
                }
            }
        });

        Self {
            buffer,
            sink,
            pdf_id,
            handle,
        }
    }

    /// Stage new content; the next tick pushes it if still unsaved.
    pub fn stage(&self, content: impl Into<String>) {
        let mut buf = self.buffer.lock().unwrap();
        buf.content = content.into();
        buf.dirty = true;
    }

    /// Whether staged content awaits a save.
    pub fn is_dirty(&self) -> bool {
        self.buffer.lock().unwrap().dirty
    }

    /// Save the staged content immediately, regardless of the timer.
    ///
    /// # Errors
    ///
    /// Propagates the save failure; the content stays staged so the timer
    /// retries it.
    pub async fn flush(&self) -> Result<()> {
        let staged = {
            let mut buf = self.buffer.lock().unwrap();
            if buf.dirty {
                buf.dirty = false;
                Some(buf.content.clone())
            } else {
                None
            }
        };

        let Some(content) = staged else {
            return Ok(());
        };

        match self.sink.save_note(self.pdf_id, &content).await {
            Ok(_) => Ok(()),
            Err(error) => {
                self.buffer.lock().unwrap().dirty = true;
                Err(error)
            }
        }
    }

    /// Stop the save loop. Unsaved content is dropped; call
    /// [`flush`](Self::flush) first to keep it.
    pub fn stop(self) {
        self.handle.abort();
    }
}
