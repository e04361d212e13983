//! Procedural macros for `optbind`.
//!
//! `#[derive(Options)]` turns a struct with named fields into an options
//! record. Every `String` field becomes a leaf option whose external name is
//! derived from the field identifier at runtime; fields marked
//! `#[opt(flatten)]` are nested records whose own leaves are spliced in
//! where the field is declared.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `optbind::Options`.
///
/// Recognised field attributes:
///
/// - `#[opt(desc = "...")]` sets the description.
/// - `#[opt(required = "true")]` or `#[opt(required = true)]` marks the
///   option required. String values are validated when the command runs.
/// - `#[opt(flatten)]` nests another options record.
#[proc_macro_derive(Options, attributes(opt))]
pub fn derive_options(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
