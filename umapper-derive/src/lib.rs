#![warn(missing_docs)]
//! Proc macro for deriving the `Mappable` trait.
//!
//! The generated code references items through the `::umapper` facade crate,
//! so consumers derive through `umapper`, not this crate directly.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attributes;
mod process_struct;

/// Derive the `Mappable` trait for structs with named fields (and unit
/// structs).
///
/// Generates the type's `Shape` constant: field descriptors with value
/// accessors, constructor parameters, and the construction vtable.
///
/// # Container attributes
///
/// * `#[umapper(default)]`: register the type's `Default` impl as its
///   zero-argument constructor, used when a mapping matches no fields at
///   all.
///
/// # Field attributes
///
/// * `#[umapper(extends)]`: the field embeds the type's ancestor. The
///   ancestor's own fields become mappable at ancestor depth, and the
///   ancestor is constructed recursively from the same argument set. At
///   most one field per struct.
///
/// Field types must be `Clone`. `Option<T>` fields are nullable, `Vec<T>`
/// fields are sequences (copied element-wise when mapped), and
/// `Option<Vec<T>>` is both. Tuple structs, enums, unions, and generic
/// types are not supported.
#[proc_macro_derive(Mappable, attributes(umapper))]
pub fn derive_mappable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    process_struct::process(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
