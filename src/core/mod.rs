//! Pure building blocks: address helpers, network tags, fixed keys.

pub mod address;
pub mod keys;
pub mod network;
