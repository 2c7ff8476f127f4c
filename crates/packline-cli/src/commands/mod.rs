pub mod demo;
pub mod session;
