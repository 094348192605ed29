//! Session module - the browser automation session and its lazy holder
//!
//! The `BrowserSession` trait is the seam to the external automation SDK;
//! `LazySession` makes one session shareable across tools with a single
//! background initialization.

pub mod lazy;
pub mod stagehand;
pub mod traits;

pub use lazy::LazySession;
pub use stagehand::StagehandSession;
pub use traits::{ActOutcome, BrowserSession, ObservedAction};
