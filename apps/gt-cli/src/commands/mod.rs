pub mod line;
pub mod render;
pub mod session;
pub mod shell;
