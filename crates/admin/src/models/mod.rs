//! Domain models for the dashboard.

pub mod notice;
pub mod session;

pub use notice::{Notice, NoticeKind};
pub use session::{AuthView, CurrentUser, keys as session_keys};
