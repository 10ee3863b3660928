pub mod endpoints;
pub mod init;
pub mod shell;
pub mod users;
