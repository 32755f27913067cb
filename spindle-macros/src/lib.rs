mod args;
use args::ExecutorArgs;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Error, ItemFn, parse_macro_input};

/// Runs an `async fn main` on a fresh executor.
///
/// The body is passed to `Executor::block_on`, so `main` returns once the body
/// and every task it spawned have completed.
///
/// ```rust,ignore
/// #[spindle::main(idle_timeout_ms = 5)]
/// async fn main() {
///     spindle::spawn(async { println!("hello") });
/// }
/// ```
#[proc_macro_attribute]
pub fn main(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ExecutorArgs);
    let input = parse_macro_input!(item as ItemFn);

    let attrs = &input.attrs;
    let vis = &input.vis;
    let sig = &input.sig;
    let block = &input.block;

    if sig.asyncness.is_none() {
        return Error::new_spanned(
            sig.fn_token,
            "#[spindle::main] must be used on an async function",
        )
        .to_compile_error()
        .into();
    }

    if sig.ident != "main" {
        return Error::new_spanned(&sig.ident, "#[spindle::main] must be used on fn main")
            .to_compile_error()
            .into();
    }

    let output = &sig.output;
    let executor = args.executor();

    quote! {
        #(#attrs)*
        #vis fn main() #output {
            let mut executor = #executor;
            executor.block_on(async move #block)
        }
    }
    .into()
}

/// Turns an `async fn` into a `#[test]` driven by a fresh executor.
///
/// ```rust,ignore
/// #[spindle::test]
/// async fn sleeps() {
///     spindle::time::sleep(Duration::from_millis(10)).await;
/// }
/// ```
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ExecutorArgs);
    let input = parse_macro_input!(item as ItemFn);

    let attrs = &input.attrs;
    let vis = &input.vis;
    let sig = &input.sig;
    let block = &input.block;

    if sig.asyncness.is_none() {
        return Error::new_spanned(
            sig.fn_token,
            "#[spindle::test] must be used on an async function",
        )
        .to_compile_error()
        .into();
    }

    if !sig.inputs.is_empty() {
        return Error::new_spanned(&sig.inputs, "#[spindle::test] functions take no arguments")
            .to_compile_error()
            .into();
    }

    let name = &sig.ident;
    let output = &sig.output;
    let executor = args.executor();

    quote! {
        #[::core::prelude::v1::test]
        #(#attrs)*
        #vis fn #name() #output {
            let mut executor = #executor;
            executor.block_on(async move #block)
        }
    }
    .into()
}
