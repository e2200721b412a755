//! Optimizers for the recurrent network

mod optimizer;
mod sgd;

pub use optimizer::Optimizer;
pub use sgd::{update, SGD};
