use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use quote::quote_spanned;
use syn::spanned::Spanned;

/// Turns `async fn name(pact: &mut Pact)` into a `#[test]` that runs against a fresh mock
/// server.
///
/// ```ignore
/// #[pact_test("Test DSL", "Projects")]
/// async fn lists_projects(pact: &mut Pact) { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn pact_test(attrs: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as syn::ItemFn);
    let args = syn::parse_macro_input!(attrs as syn::AttributeArgs);

    let consumer;
    let provider;

    if args.len() != 2 {
        return compile_error(
            Span::call_site(),
            "A consumer name and a provider name should be passed to the macro",
        );
    }

    match (&args[0], &args[1]) {
        (
            syn::NestedMeta::Lit(syn::Lit::Str(parsed_consumer)),
            syn::NestedMeta::Lit(syn::Lit::Str(parsed_provider)),
        ) => {
            consumer = parsed_consumer.value();
            provider = parsed_provider.value();
        }
        _ => {
            let span = args
                .iter()
                .find(|arg| !matches!(arg, syn::NestedMeta::Lit(syn::Lit::Str(_))))
                .map_or_else(Span::call_site, |arg| arg.span());
            return compile_error(
                span,
                "The consumer and the provider names should be string literals!",
            );
        }
    }

    let signature = &input.sig;
    let attributes = &input.attrs;
    let block = &input.block;
    let name = &signature.ident;

    if signature.asyncness.is_none() {
        return compile_error(signature.fn_token.span, "The test function should be async!");
    }

    let (pattern, argument_type) = match single_argument(signature) {
        Some(argument) => argument,
        None => {
            return compile_error(
                signature.inputs.span(),
                "The test function should take exactly one `&mut Pact` argument!",
            );
        }
    };

    let output = quote! {
        #[test]
        #(#attributes)*
        fn #name() {
            ::pact_dsl::runner::block_on(async {
                let mut __pact_session =
                    ::pact_dsl::runner::start_session(#consumer, #provider).await;
                let __pact_outcome = {
                    let #pattern: #argument_type = &mut __pact_session;
                    ::pact_dsl::runner::run_guarded(async move #block).await
                };
                ::pact_dsl::runner::finish_session(__pact_session, __pact_outcome).await;
            })
        }
    };

    TokenStream::from(output)
}

fn compile_error(span: Span, message: &str) -> TokenStream {
    quote_spanned! {span=>
        compile_error!(#message);
    }
    .into()
}

fn single_argument(signature: &syn::Signature) -> Option<(&syn::Pat, &syn::Type)> {
    if signature.inputs.len() != 1 {
        return None;
    }

    match signature.inputs.first()? {
        syn::FnArg::Typed(pat_type) => Some((&*pat_type.pat, &*pat_type.ty)),
        syn::FnArg::Receiver(_) => None,
    }
}
