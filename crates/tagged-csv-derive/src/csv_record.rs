//! Implementation of #[derive(CsvRecord)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use std::collections::HashMap;
use syn::ext::IdentExt;
use syn::{
    parse_macro_input, Data, DeriveInput, Expr, ExprLit, Field, Fields, Ident, Lit, LitStr, Type,
};

pub fn derive_csv_record_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// An annotated field, ready for code generation.
struct ColumnField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    ident_str: String,
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let name_str = name.unraw().to_string();

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "CsvRecord does not support generic structs",
        ));
    }

    // Validate: must be a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "CsvRecord requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "CsvRecord only works on structs",
            ))
        }
    };

    let mut descriptor_fields = Vec::with_capacity(fields.len());
    let mut columns: Vec<ColumnField<'_>> = Vec::new();
    let mut claimed: HashMap<String, String> = HashMap::new();

    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let ident_str = ident.unraw().to_string();
        let ty = &field.ty;
        let type_str = ty.to_token_stream().to_string().replace(' ', "");

        match column_annotation(field)? {
            Some(column) => {
                if let Some(first) = claimed.insert(column.value(), ident_str.clone()) {
                    return Err(syn::Error::new_spanned(
                        &column,
                        format!(
                            "column \"{}\" is already mapped by field `{first}`",
                            column.value()
                        ),
                    ));
                }
                descriptor_fields.push(quote! {
                    .field(::tagged_csv_core::FieldDescriptor::annotated(
                        #ident_str,
                        #type_str,
                        <#ty as ::tagged_csv_core::CsvScalar>::KIND,
                        #column,
                    ))
                });
                columns.push(ColumnField { ident, ty, ident_str });
            }
            None => {
                descriptor_fields.push(quote! {
                    .field(::tagged_csv_core::FieldDescriptor::unannotated(#ident_str, #type_str))
                });
            }
        }
    }

    let getters = columns.iter().map(|c| {
        let ColumnField { ident, ty, ident_str } = c;
        quote! {
            #ident_str => ::std::option::Option::Some(
                <#ty as ::tagged_csv_core::CsvScalar>::to_field_value(&self.#ident)
            ),
        }
    });

    let setters = columns.iter().map(|c| {
        let ColumnField { ident, ty, ident_str } = c;
        quote! {
            #ident_str => {
                self.#ident = <#ty as ::tagged_csv_core::CsvScalar>::from_field_value(value)?;
                ::std::result::Result::Ok(())
            }
        }
    });

    Ok(quote! {
        impl ::tagged_csv_core::Record for #name {
            fn descriptor() -> &'static ::tagged_csv_core::TypeDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<::tagged_csv_core::TypeDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    ::tagged_csv_core::TypeDescriptor::Record(
                        ::tagged_csv_core::RecordDescriptor::builder(#name_str)
                            #(#descriptor_fields)*
                            .build(),
                    )
                })
            }

            fn field_value(
                &self,
                field: &str,
            ) -> ::std::option::Option<::tagged_csv_core::FieldValue> {
                match field {
                    #(#getters)*
                    _ => ::std::option::Option::None,
                }
            }

            fn set_field_value(
                &mut self,
                field: &str,
                value: ::tagged_csv_core::FieldValue,
            ) -> ::std::result::Result<(), ::tagged_csv_core::FieldValue> {
                match field {
                    #(#setters)*
                    _ => ::std::result::Result::Err(value),
                }
            }
        }
    })
}

/// Read `#[col = "..."]` from a field. An empty column name counts as no
/// annotation.
fn column_annotation(field: &Field) -> syn::Result<Option<LitStr>> {
    let mut column: Option<LitStr> = None;

    for attr in &field.attrs {
        if !attr.path().is_ident("col") {
            continue;
        }

        let name_value = attr.meta.require_name_value()?;
        let lit = match &name_value.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) => lit.clone(),
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected a string literal: #[col = \"column name\"]",
                ))
            }
        };

        if column.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[col] attribute"));
        }
        column = Some(lit);
    }

    Ok(column.filter(|lit| !lit.value().is_empty()))
}
