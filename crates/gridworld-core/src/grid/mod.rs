pub mod codec;
pub mod config;
pub mod episode;
pub mod error;
pub mod ids;
pub mod mdp;
pub mod model;
pub mod returns;
pub mod snapshot;
pub mod solver;
pub mod tables;
pub mod trajectory;

#[cfg(test)]
mod tests;
