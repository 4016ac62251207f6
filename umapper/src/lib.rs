#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
//! Structural object mapping by field name.
//!
//! `umapper` converts between structurally similar but independently
//! defined types (a persistence row and a transfer object, say) without
//! hand-written conversion code. Fields are matched by name, including
//! fields of an embedded ancestor; unmatched `Option` fields are left
//! empty, unmatched required fields fail the mapping.
//!
//! ```
//! use umapper::{Mappable, MapExt};
//!
//! #[derive(Mappable)]
//! struct OrderRow {
//!     id: u64,
//!     customer: String,
//!     internal_notes: String,
//! }
//!
//! #[derive(Mappable)]
//! struct OrderDto {
//!     id: u64,
//!     customer: String,
//!     tracking_code: Option<String>,
//! }
//!
//! let row = OrderRow {
//!     id: 4021,
//!     customer: "Miyazaki".into(),
//!     internal_notes: "fragile".into(),
//! };
//! let dto: OrderDto = row.map_into()?;
//! assert_eq!(dto.id, 4021);
//! assert_eq!(dto.customer, "Miyazaki");
//! assert!(dto.tracking_code.is_none());
//! # Ok::<(), umapper::MapperError>(())
//! ```
//!
//! There is no configuration and no caching: every call rediscovers fields
//! from the compile-time shape constants, and either returns a complete
//! instance or a [`MapperError`], never a partial result.

pub use umapper_core::*;

/// Derive the [`Mappable`] trait for structs with named fields (and unit
/// structs).
///
/// ```rust
/// # use umapper::Mappable;
/// #[derive(Mappable)]
/// struct FooBar {
///     foo: u32,
///     bar: String,
/// }
/// ```
///
/// # Container Attributes
///
/// * `default`: register the type's `Default` impl as its zero-argument
///   constructor, used as the fallback when a mapping matches no fields at
///   all.
///
/// ```rust
/// # use umapper::Mappable;
/// #[derive(Mappable, Default)]
/// #[umapper(default)]
/// struct Settings {
///     verbose: Option<bool>,
/// }
/// ```
///
/// # Field Attributes
///
/// * `extends`: the field embeds the type's ancestor; the ancestor's
///   fields become mappable on this type, shadowed by any same-named field
///   declared here. At most one per struct.
///
/// ```rust
/// # use umapper::Mappable;
/// #[derive(Mappable)]
/// struct Entity {
///     id: u64,
/// }
///
/// #[derive(Mappable)]
/// struct Customer {
///     name: String,
///     #[umapper(extends)]
///     entity: Entity,
/// }
/// ```
pub use umapper_derive::*;

pub use umapper_reflect::*;

/// Mapping as a method on the source value, for call sites that read better
/// postfix: `row.map_into::<Dto>()`.
pub trait MapExt: Mappable + Sized {
    /// Maps this instance onto a new instance of the target type.
    /// Equivalent to [`map(self)`](map).
    fn map_into<Dst: Mappable>(&self) -> Result<Dst, MapperError> {
        map(self)
    }
}

impl<T: Mappable + Sized> MapExt for T {}

static_assertions::assert_impl_all!(Shape: Sync);
static_assertions::assert_impl_all!(MapperError: Send, Sync);
