use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Error, Result};

use crate::util;

pub(crate) fn derive(input: TokenStream) -> Result<TokenStream> {
    let mut input: syn::DeriveInput = syn::parse2(input)?;
    referrer(&mut input, quote!(::kindec))
}

/// Generates the `Referrer` implementation for `input`,
/// stripping the `#[entity]` markers from its fields.
pub(crate) fn referrer(
    input: &mut syn::DeriveInput,
    crate_name: TokenStream,
) -> Result<TokenStream> {
    let generics = util::parse_generics(input);

    let body = match &mut input.data {
        syn::Data::Struct(s) => {
            let mut field_values = Vec::new();

            for (i, field) in s.fields.iter_mut().enumerate() {
                if drain_entity_attr(&mut field.attrs) {
                    field_values.push(match &field.ident {
                        Some(ident) => quote!(self.#ident),
                        None => {
                            let index = syn::Index::from(i);
                            quote!(self.#index)
                        }
                    });
                }
            }

            quote! {
                #(
                    #crate_name::entity::Referrer::visit_each(&mut #field_values, &mut *visitor);
                )*
            }
        }
        syn::Data::Enum(e) => {
            let mut arms = Vec::new();

            for variant in &mut e.variants {
                let variant_ident = &variant.ident;

                let (pattern, fields) = match &mut variant.fields {
                    syn::Fields::Unit => (quote!(), Vec::new()),
                    syn::Fields::Unnamed(fields) => {
                        let mut patterns = Vec::new();
                        let mut entity_fields = Vec::new();

                        for (i, field) in fields.unnamed.iter_mut().enumerate() {
                            if drain_entity_attr(&mut field.attrs) {
                                let field_name = format_ident!("field_{}", i);
                                patterns.push(quote!(#field_name));
                                entity_fields.push(field_name);
                            } else {
                                patterns.push(quote!(_));
                            }
                        }

                        (quote!((#(#patterns),*)), entity_fields)
                    }
                    syn::Fields::Named(fields) => {
                        let mut entity_fields = Vec::new();

                        for field in &mut fields.named {
                            let field_name = field.ident.as_ref().expect("named fields");
                            if drain_entity_attr(&mut field.attrs) {
                                entity_fields.push(field_name.clone());
                            }
                        }

                        (quote!({ #(#entity_fields,)* .. }), entity_fields)
                    }
                };

                arms.push(quote! {
                    Self::#variant_ident #pattern => {
                        #(
                            #crate_name::entity::Referrer::visit_each(#fields, &mut *visitor);
                        )*
                    },
                });
            }

            quote! {
                match self {
                    #(#arms)*
                }
            }
        }
        syn::Data::Union(u) => {
            return Err(Error::new_spanned(u.union_token, "only structs and enums are supported"))
        }
    };

    Ok(generics.impl_trait(
        quote!(#crate_name::entity::Referrer),
        quote! {
            #[allow(unused_variables)]
            fn visit_each<V: #crate_name::entity::Visitor + ?Sized>(&mut self, visitor: &mut V) {
                #body
            }
        },
    ))
}

fn drain_entity_attr(vec: &mut Vec<syn::Attribute>) -> bool {
    match vec.iter().position(|attr| attr.path().is_ident("entity")) {
        Some(index) => {
            vec.remove(index);
            true
        }
        None => false,
    }
}
