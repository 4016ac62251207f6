#![warn(missing_docs)]
//! Proc macro for umapper-testhelpers.

use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, parse_macro_input};

/// Replacement for the standard `#[test]` attribute: installs the error and
/// logging hooks from `umapper-testhelpers` and lets the test body use `?`
/// by wrapping it in an `eyre::Result`.
#[proc_macro_attribute]
pub fn test(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let attrs = &input.attrs;
    let vis = &input.vis;
    let name = &input.sig.ident;
    let block = &input.block;

    quote! {
        #(#attrs)*
        #[::core::prelude::rust_2024::test]
        #vis fn #name() -> ::umapper_testhelpers::eyre::Result<()> {
            ::umapper_testhelpers::setup();

            #block

            Ok(())
        }
    }
    .into()
}
