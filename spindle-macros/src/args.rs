use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Error, Expr, ExprLit, Lit, MetaNameValue, Token};

/// Arguments accepted by `#[spindle::main]` and `#[spindle::test]`.
///
/// ```text
/// #[spindle::main(idle_timeout_ms = 5)]
/// ```
#[derive(Default)]
pub(crate) struct ExecutorArgs {
    /// Idle timeout of the run loop, in milliseconds.
    pub(crate) idle_timeout_ms: Option<u64>,
}

impl Parse for ExecutorArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self::default();
        let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated(input)?;

        for pair in pairs {
            if !pair.path.is_ident("idle_timeout_ms") {
                return Err(Error::new_spanned(
                    &pair.path,
                    "unknown argument, expected `idle_timeout_ms`",
                ));
            }

            if args.idle_timeout_ms.is_some() {
                return Err(Error::new_spanned(
                    &pair.path,
                    "`idle_timeout_ms` is set more than once",
                ));
            }

            let Expr::Lit(ExprLit {
                lit: Lit::Int(value),
                ..
            }) = &pair.value
            else {
                return Err(Error::new_spanned(
                    &pair.value,
                    "`idle_timeout_ms` must be an integer literal",
                ));
            };

            args.idle_timeout_ms = Some(value.base10_parse()?);
        }

        Ok(args)
    }
}

impl ExecutorArgs {
    /// Expression building the executor these arguments describe.
    pub(crate) fn executor(&self) -> TokenStream {
        let idle_timeout = self.idle_timeout_ms.map(|ms| {
            quote! {
                .idle_timeout(::std::time::Duration::from_millis(#ms))
            }
        });

        quote! {
            ::spindle::Executor::builder()
                #idle_timeout
                .build()
                .expect("failed to build executor")
        }
    }
}
