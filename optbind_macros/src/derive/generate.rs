//! Code generation for the `Options` impl.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::DeriveInput;

use super::parse::{FieldKind, OptField};

/// Builds the `describe` implementation, one statement per field.
pub(crate) fn options_impl(
    input: &DeriveInput,
    krate: &TokenStream,
    fields: &[OptField],
) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let body = if fields.is_empty() {
        quote! { ::std::vec::Vec::new() }
    } else {
        let statements = fields.iter().map(|field| field_statement(krate, field));
        quote! {
            let mut fields = ::std::vec::Vec::new();
            #( #statements )*
            fields
        }
    };
    quote! {
        impl #impl_generics #krate::Options for #ident #ty_generics #where_clause {
            fn describe(&mut self) -> ::std::vec::Vec<#krate::FieldDescriptor<'_>> {
                #body
            }
        }
    }
}

fn field_statement(krate: &TokenStream, field: &OptField) -> TokenStream {
    let member = &field.member;
    let span = member.span();
    match &field.kind {
        FieldKind::Flatten => quote_spanned! {span=>
            fields.extend(#krate::Options::describe(&mut self.#member));
        },
        FieldKind::Leaf {
            description,
            required,
        } => {
            let name = &field.ident;
            let description = description
                .as_ref()
                .map(|text| quote! { .with_description(#text) });
            let required = required
                .as_ref()
                .map(|text| quote! { .with_required(#text) });
            quote_spanned! {span=>
                fields.push(
                    #krate::FieldDescriptor::new(#name, &mut self.#member)
                        #description
                        #required
                );
            }
        }
    }
}
