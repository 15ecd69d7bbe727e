pub mod beta_function;
pub mod config;
pub mod error;
pub mod line_role;
pub mod posterior;
pub mod prior;
pub mod sweep;
