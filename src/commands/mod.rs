pub mod events;
pub mod hook;
pub mod import;
pub mod install;
