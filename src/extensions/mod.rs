//! Optional hooks into the viewport controller live here.
//!
//! Keep extensions out of core paths; core types never call back into them.

pub mod observers;

pub use observers::{ViewportContext, ViewportEvent, ViewportObserver};
