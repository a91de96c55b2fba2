mod context;
pub mod init;
pub mod keys;
pub mod links;
pub mod locate;

pub use context::CommandContext;
