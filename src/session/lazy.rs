//! Lazy session holder
//!
//! Starts session initialization in the background at construction and
//! lets any number of callers await the single shared outcome.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::core::{Result, StagekitError};
use crate::session::traits::BrowserSession;

type InitOutcome = std::result::Result<(), Arc<StagekitError>>;

/// Holds one browser session and its in-flight initialization
///
/// At most one initialization is ever attempted per holder. Callers that
/// arrive before it completes suspend on the shared handle; callers that
/// arrive after observe the stored outcome, success or failure alike.
pub struct LazySession {
    session: Arc<dyn BrowserSession>,
    init: Shared<BoxFuture<'static, InitOutcome>>,
}

impl LazySession {
    /// Create a holder and begin initializing the session in the background
    ///
    /// Must be called from within a Tokio runtime. Construction never
    /// fails; an initialization failure surfaces to callers of
    /// [`ready`](Self::ready).
    pub fn new(session: Arc<dyn BrowserSession>) -> Self {
        let task = tokio::spawn({
            let session = session.clone();
            async move { session.init().await.map_err(Arc::new) }
        });

        let init = async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(join_err) => Err(Arc::new(StagekitError::session(format!(
                    "initialization task failed: {}",
                    join_err
                )))),
            }
        }
        .boxed()
        .shared();

        Self { session, init }
    }

    /// Wait for initialization to complete, then return the session
    pub async fn ready(&self) -> Result<Arc<dyn BrowserSession>> {
        self.init.clone().await.map_err(StagekitError::Init)?;
        Ok(self.session.clone())
    }

    /// The raw session handle, without waiting for initialization
    ///
    /// For callers that already know the session is ready.
    pub fn session(&self) -> Arc<dyn BrowserSession> {
        self.session.clone()
    }
}
