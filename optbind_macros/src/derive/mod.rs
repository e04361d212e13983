//! Expansion of `#[derive(Options)]`.

mod crate_path;
mod generate;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Expands the derive for `input`, failing fast on invalid attributes.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.crate_path.as_ref());
    Ok(generate::options_impl(input, &krate, &parsed.fields))
}
