//! Session access shared by all tool adapters
//!
//! A tool either shares one `LazySession` with its siblings or owns a
//! private one created on first use, so every adapter works standalone
//! as well as inside a toolkit.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::core::{Result, StagehandConfig};
use crate::session::{BrowserSession, LazySession, StagehandSession};

/// How a tool reaches its browser session
pub struct SessionBinding {
    shared: Option<Arc<LazySession>>,
    local: OnceCell<Arc<LazySession>>,
    config: StagehandConfig,
}

impl SessionBinding {
    /// Bind to a holder shared with other tools
    pub fn shared(holder: Arc<LazySession>) -> Self {
        Self {
            shared: Some(holder),
            local: OnceCell::new(),
            config: StagehandConfig::default(),
        }
    }

    /// Standalone binding; a private session is created lazily from the
    /// given configuration on first use
    pub fn standalone(config: StagehandConfig) -> Self {
        Self {
            shared: None,
            local: OnceCell::new(),
            config,
        }
    }
}

/// Resolve a ready session from a binding
///
/// Shared bindings wait on the shared holder. Standalone bindings create
/// their private holder exactly once, then wait on it. The only error
/// this returns is an initialization failure.
pub async fn acquire(binding: &SessionBinding) -> Result<Arc<dyn BrowserSession>> {
    if let Some(holder) = &binding.shared {
        return holder.ready().await;
    }

    let holder = binding
        .local
        .get_or_init(|| async {
            let session = StagehandSession::new(binding.config.clone());
            Arc::new(LazySession::new(Arc::new(session)))
        })
        .await;

    holder.ready().await
}
