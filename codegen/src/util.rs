use proc_macro2::TokenStream;
use quote::{quote, ToTokens};

pub(crate) fn parse_generics(input: &syn::DeriveInput) -> ParsedGenerics {
    let (decl, usage, where_) = input.generics.split_for_impl();

    ParsedGenerics {
        ident:  input.ident.clone(),
        decl:   decl.to_token_stream(),
        usage:  usage.to_token_stream(),
        where_: where_.to_token_stream(),
    }
}

pub(crate) struct ParsedGenerics {
    pub(crate) ident:  proc_macro2::Ident,
    pub(crate) decl:   proc_macro2::TokenStream,
    pub(crate) usage:  proc_macro2::TokenStream,
    pub(crate) where_: proc_macro2::TokenStream,
}

impl ParsedGenerics {
    pub(crate) fn impl_trait(&self, trait_: TokenStream, body: TokenStream) -> TokenStream {
        let Self { ident, decl, usage, where_ } = self;
        quote! {
            impl #decl #trait_ for #ident #usage #where_ {
                #body
            }
        }
    }
}
