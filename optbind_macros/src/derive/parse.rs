//! Parsing of the struct and its `#[opt(...)]` field attributes.

use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Fields, Lit};

/// How a field takes part in option discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldKind {
    /// A `String` leaf bound to one option.
    Leaf {
        description: Option<String>,
        required: Option<String>,
    },
    /// A nested options record.
    Flatten,
}

/// A named field together with its parsed attributes.
#[derive(Debug, Clone)]
pub(crate) struct OptField {
    pub member: syn::Ident,
    pub ident: String,
    pub kind: FieldKind,
}

/// The parsed derive input: struct-level settings and the fields.
#[derive(Debug, Clone)]
pub(crate) struct OptInput {
    pub crate_path: Option<syn::Path>,
    pub fields: Vec<OptField>,
}

#[derive(Default)]
struct FieldAttrs {
    description: Option<String>,
    required: Option<String>,
    flatten: Option<proc_macro2::Span>,
}

/// Collects the struct settings and named fields of `input`, the latter in
/// declaration order.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<OptInput> {
    let crate_path = parse_struct_attrs(&input.attrs)?;
    let fields = parse_fields(input)?;
    Ok(OptInput { crate_path, fields })
}

fn parse_fields(input: &DeriveInput) -> syn::Result<Vec<OptField>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Options can only be derived for structs",
        ));
    };
    let named = match &data.fields {
        Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                data.struct_token,
                "Options requires named fields",
            ));
        }
    };
    named
        .into_iter()
        .map(|field| {
            let member = field
                .ident
                .clone()
                .ok_or_else(|| syn::Error::new_spanned(field, "Options requires named fields"))?;
            let attrs = parse_field_attrs(&field.attrs)?;
            let kind = match attrs.flatten {
                Some(span) if attrs.description.is_some() || attrs.required.is_some() => {
                    return Err(syn::Error::new(
                        span,
                        "flatten cannot be combined with desc or required",
                    ));
                }
                Some(_) => FieldKind::Flatten,
                None => FieldKind::Leaf {
                    description: attrs.description,
                    required: attrs.required,
                },
            };
            Ok(OptField {
                ident: member.unraw().to_string(),
                member,
                kind,
            })
        })
        .collect()
}

fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<Option<syn::Path>> {
    let mut crate_path = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("opt")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("crate") {
                return Err(meta.error("unknown opt attribute on a struct; expected crate"));
            }
            let text = lit_str(&meta, "crate")?;
            let path = syn::parse_str::<syn::Path>(&text)
                .map_err(|err| syn::Error::new(meta.path.span(), err))?;
            crate_path = Some(path);
            Ok(())
        })?;
    }
    Ok(crate_path)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("opt")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("desc") {
                out.description = Some(lit_str(&meta, "desc")?);
            } else if meta.path.is_ident("required") {
                out.required = Some(required_tag(&meta)?);
            } else if meta.path.is_ident("flatten") {
                out.flatten = Some(meta.path.span());
            } else {
                return Err(meta.error("unknown opt attribute; expected desc, required or flatten"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

fn lit_str(meta: &syn::meta::ParseNestedMeta, key: &str) -> syn::Result<String> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s.value()),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}

/// Reads `required` as written. Strings are kept verbatim so that malformed
/// values surface when the option set is built.
fn required_tag(meta: &syn::meta::ParseNestedMeta) -> syn::Result<String> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(s) => Ok(s.value()),
        Lit::Bool(b) => Ok(b.value.to_string()),
        other => Err(syn::Error::new(
            other.span(),
            "required must be a string or a bool",
        )),
    }
}
