//! Request extractors

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::{CounterpartIdPath, MessageIdPath};
pub use validated::ValidatedJson;
