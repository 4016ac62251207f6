#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
//! The structural mapping engine.
//!
//! [`map`] copies values between two independently defined types by field
//! name: fields are discovered along each type's ancestor chain, matched by
//! name, and the target is constructed from the matched values while
//! enforcing each constructor parameter's nullability contract. When no
//! names match at all, the target's registered zero-argument constructor is
//! used instead, if it has one.
//!
//! The engine is stateless: every call rediscovers fields from the shape
//! constants and keeps all intermediate structures on the call's own stack.
//! Concurrent calls never share mutable state.

extern crate alloc;

mod error;
pub use error::*;

mod peek;
pub use peek::*;

mod discover;
pub use discover::*;

mod matcher;
pub use matcher::*;

mod instantiate;
pub use instantiate::*;

mod mapper;
pub use mapper::*;

#[cfg(test)]
mod tests;
