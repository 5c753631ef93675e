pub mod catalog;
pub mod keyboard;
pub mod notify;
pub mod session;
pub mod theme;
