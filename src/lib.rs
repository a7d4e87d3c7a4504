// Core infrastructure modules
pub mod config;
pub mod core;

// Feature-specific modules
pub mod choice;
pub mod menu;
pub mod prompt;
pub mod queries;
pub mod results_grid;
pub mod validation;
pub mod workflow;

#[cfg(test)]
pub mod test_utils;
