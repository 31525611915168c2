pub mod browse;
pub mod cli;
pub mod session;
