pub mod anchor;
pub mod classify;
pub mod error;
pub mod extract;
pub mod provider;
pub mod types;
pub mod verify;

#[cfg(test)]
pub(crate) mod testing;
