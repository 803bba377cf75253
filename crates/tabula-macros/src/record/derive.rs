//! Implementation of the `#[derive(Record)]` macro.
//!
//! This macro generates an implementation of the `Record` trait, the column
//! definitions for the annotated fields, and field name constants.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_column_attrs;

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut column_defs: Vec<TokenStream> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_column_attrs(&field.attrs)?;

        if attrs.skip {
            continue;
        }

        // Fields without a column type are not columns
        let Some(column_type) = attrs.column_type else {
            continue;
        };

        let accessor = attrs.rename.unwrap_or_else(|| field_name.to_string());
        if !seen.insert(accessor.clone()) {
            return Err(Error::new(
                attrs.span,
                format!("duplicate column accessor: '{accessor}'"),
            ));
        }

        let const_name = format_ident!("{}", to_screaming_snake_case(&accessor));
        field_constants.push(quote! {
            /// Column accessor constant.
            pub const #const_name: &'static str = #accessor;
        });

        field_matches.push(quote! {
            #accessor => ::tabula::ToValue::to_value(&self.#field_name),
        });

        let variant = format_ident!("{}", column_type.variant());
        let header = attrs.header.map(|h| quote! { .header(#h) });
        let sortable = attrs.sortable;
        let filterable = attrs.filterable;
        column_defs.push(quote! {
            ::tabula::ColumnDef::new(#accessor, ::tabula::DataType::#variant)
                #header
                .sortable(#sortable)
                .filterable(#filterable)
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*

            /// Column definitions for the annotated fields, in declaration
            /// order.
            pub fn columns() -> ::std::vec::Vec<::tabula::ColumnDef> {
                ::std::vec![#(#column_defs),*]
            }
        }

        impl #impl_generics ::tabula::Record for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::tabula::Value<'_> {
                match field {
                    #(#field_matches)*
                    _ => ::tabula::Value::Missing,
                }
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == '.' || c == ' ' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
