// Library exports for the snake solvers
// The binary and the integration tests use the core through these modules

pub mod action;
pub mod config;
pub mod environment;
pub mod runner;
pub mod scores;
pub mod solvers;
pub mod vector;
