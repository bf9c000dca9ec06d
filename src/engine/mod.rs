mod policy;
mod processor;
mod result;
#[cfg(test)]
pub mod integration_tests;

pub use policy::{OnError, StopRule};
pub use processor::LinkedListProcessor;
pub use result::{Halt, NodeFailure, ProcessResult};
