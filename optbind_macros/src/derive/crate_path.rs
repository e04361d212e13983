//! Resolution of the path generated code uses to reach `optbind`.
//!
//! `#[opt(crate = "...")]` on the struct replaces the default `::optbind`
//! prefix so crates that re-export `optbind` can use the derive.

use proc_macro2::TokenStream;
use quote::quote;

/// Returns the override, or `::optbind` when none was given.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::optbind }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use rstest::rstest;

    #[rstest]
    #[case::default(None, ":: optbind")]
    #[case::alias(Some("cli_kit"), "cli_kit")]
    #[case::nested(Some("cli_kit::optbind"), "cli_kit :: optbind")]
    fn resolves_crate_prefix(#[case] input: Option<&str>, #[case] expected: &str) -> Result<()> {
        let parsed = input
            .map(syn::parse_str::<syn::Path>)
            .transpose()
            .map_err(|err| anyhow!(err))?;
        anyhow::ensure!(
            resolve(parsed.as_ref()).to_string() == expected,
            "unexpected prefix for {input:?}"
        );
        Ok(())
    }
}
