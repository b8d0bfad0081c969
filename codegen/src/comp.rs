use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Error, Result};

use crate::{referrer, util};

pub(crate) fn imp(args: TokenStream, input: TokenStream) -> Result<TokenStream> {
    let opts = Punctuated::<syn::Meta, syn::Token![,]>::parse_terminated.parse2(args)?;

    let mut multi = false;
    let mut name = None;

    for opt in opts {
        match opt {
            syn::Meta::Path(path) if path.is_ident("multi") => multi = true,
            syn::Meta::NameValue(nv) if nv.path.is_ident("name") => match nv.value {
                syn::Expr::Lit(syn::ExprLit { lit: syn::Lit::Str(lit), .. }) => name = Some(lit),
                value => return Err(Error::new_spanned(value, "expected a string literal")),
            },
            opt => {
                return Err(Error::new_spanned(
                    opt,
                    "unknown option, expected `multi` or `name = \"...\"`",
                ))
            }
        }
    }

    let mut input: syn::DeriveInput = syn::parse2(input)?;
    let crate_name = quote!(::kindec);

    // strips the #[entity] markers, so it must run before `input` is re-emitted
    let impl_referrer = referrer::referrer(&mut input, crate_name.clone())?;

    let generics = util::parse_generics(&input);

    let storage = if multi {
        quote!(#crate_name::storage::Chain<Self>)
    } else {
        quote!(#crate_name::storage::Dense<Self>)
    };
    let name_fn = name.map(|name| quote!(fn name() -> &'static str { #name }));

    let impl_comp = generics.impl_trait(
        quote!(#crate_name::comp::Comp),
        quote! {
            type Storage = #storage;
            #name_fn
        },
    );

    Ok(quote! {
        #input
        #impl_referrer
        #impl_comp
    })
}
