pub mod context;
pub mod health;
pub mod history;
pub mod render;
pub mod session;
