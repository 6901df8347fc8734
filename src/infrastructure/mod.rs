pub mod adapters;
pub mod cli;
