mod model;
pub mod render;
mod session;

pub use model::{Action, Notice, NoticeLevel, Placeholder, ViewState};
pub use session::Session;
