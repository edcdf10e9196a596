//! Storage layer - the store trait and its in-memory implementation

pub mod memory;
pub mod predicate;
pub mod traits;

pub use memory::MemoryStore;
pub use predicate::Operator;
pub use traits::EntityStore;
