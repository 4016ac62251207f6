#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
//! Core types and traits for the umapper ecosystem.
//!
//! This crate defines the compile-time descriptor model that the rest of the
//! ecosystem operates on: every type participating in structural mapping
//! exposes a [`Shape`] listing its fields, its constructor parameters, an
//! optional link to an embedded ancestor, and a vtable of function pointers
//! for reading field values off a live instance and constructing new
//! instances from named arguments.
//!
//! Shapes are not written by hand: `umapper-derive` generates them. The
//! mapping engine itself lives in `umapper-reflect`; the `umapper` crate
//! re-exports everything.

extern crate alloc;

// Type definitions
mod types;
pub use types::*;

// Owned field values
mod value;
pub use value::*;

// Named-argument sets for construction
mod args;
pub use args::*;

/// Allows querying the [`Shape`] of a type: its assignable fields (including
/// those of an embedded ancestor), its constructor parameters, and the
/// function pointers needed to read values off an instance and to build a
/// new instance.
///
/// Implemented via `#[derive(Mappable)]`; the shape is a compile-time
/// constant, so querying it never allocates and is safe to do from any
/// thread.
pub trait Mappable: core::any::Any {
    /// The shape of this type.
    const SHAPE: &'static Shape;
}
