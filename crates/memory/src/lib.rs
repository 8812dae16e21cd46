//! Session store implementations for AdmitBot.

pub mod in_memory;

pub use in_memory::InMemorySessionStore;
