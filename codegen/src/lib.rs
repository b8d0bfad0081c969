use proc_macro::TokenStream;

mod comp;
mod referrer;
mod util;

#[proc_macro_attribute]
pub fn comp(args: TokenStream, input: TokenStream) -> TokenStream {
    comp::imp(args.into(), input.into()).unwrap_or_else(|err| err.to_compile_error()).into()
}

#[proc_macro_derive(Referrer, attributes(entity))]
pub fn referrer(input: TokenStream) -> TokenStream {
    referrer::derive(input.into()).unwrap_or_else(|err| err.to_compile_error()).into()
}
