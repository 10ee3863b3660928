mod endpoint;
mod user;

pub use endpoint::{DeleteStyle, Endpoint};
pub use user::{User, UserId};
