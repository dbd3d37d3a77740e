mod comments;
pub mod config;
mod error;
mod notify;
pub mod pending;
mod reconciler;
mod remote;
mod session;
mod store;
mod traits;

#[cfg(test)]
mod test_support;

pub use comments::{CachedComment, CommentCache, CommentThread, PendingComment, SubmitOutcome};
pub use error::InteractionFailed;
pub use notify::{Notification, Severity, TracingNotifier};
pub use reconciler::{Interactions, ToggleOutcome};
pub use remote::HttpRemote;
pub use session::TokenSession;
pub use store::{FileStore, LocalStore, MemoryStore, ToggleStore};
pub use traits::{Notifier, RemoteApi, SessionGate};
