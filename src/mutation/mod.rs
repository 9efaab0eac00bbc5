mod mutation_batch;
mod mutator;

pub use mutation_batch::{Mutation, MutationBatch};
pub use mutator::{MutationResult, Mutator};
