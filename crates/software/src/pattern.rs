//! The two algorithms which produce a new set of outputs each time the CV input rises: independent weighted coin flips
//! ([`Probability`]) and bounded random walks ([`RandomWalks`]).

mod probability;
pub use probability::*;

mod walk;
pub use walk::*;
