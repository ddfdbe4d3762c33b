pub mod app_config;
pub mod confirmation;
pub mod memory;
pub mod seed;

pub use confirmation::{RandomCodeGenerator, SequenceCodeGenerator};
pub use memory::MemoryStore;
