pub mod com;
pub mod density;
