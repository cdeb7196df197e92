pub mod args;
pub mod exit;
