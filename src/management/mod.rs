mod auth;
mod session;
mod workflow;

pub use auth::TokenManager;
pub use session::{PendingLogin, Session, SessionStore};
pub use workflow::{SavedCopy, WorkflowCache, WorkflowError};
