// Resume records: the store capability, the five operations over it, and their HTTP handlers.

pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod service;
pub mod store;
