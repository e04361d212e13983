//! trybuild coverage for `#[derive(Options)]`.
//!
//! Ensures generated implementations compile from a downstream crate that
//! only sees the public API.

#[test]
fn derived_records_compile() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/derive_nested.rs");
    t.pass("tests/trybuild/derive_generic.rs");
    t.pass("tests/trybuild/derive_crate_path.rs");
}
