//! Procedural macros for the aoc-solver library

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, Lit, parse_macro_input};

/// Derive macro for automatically registering a day's solution with the plugin system
///
/// This macro generates the necessary code to submit the solution to the inventory
/// system, so `SolutionRegistry::from_plugins()` finds it without a manifest.
///
/// # Attributes
///
/// - `day`: Required. The puzzle day (1-25)
///
/// # Requirements
///
/// The type must implement both `Solution` and `Default`; a fresh instance is
/// created through `Default` for every run. Missing impls are reported at compile time:
///
/// ```text
/// error[E0277]: the trait bound `YourSolution: Solution` is not satisfied
/// ```
///
/// # Example
///
/// ```ignore
/// use aoc_solver::{AutoRegisterSolution, Solution, SolveError};
///
/// #[derive(Default, AutoRegisterSolution)]
/// #[aoc(day = 1)]
/// pub struct Day01;
///
/// impl Solution for Day01 {
///     fn run_part_a(&self, input: &str) -> Result<String, SolveError> {
///         Ok(input.lines().count().to_string())
///     }
/// }
/// ```
#[proc_macro_derive(AutoRegisterSolution, attributes(aoc))]
pub fn derive_auto_register_solution(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let aoc_attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("aoc"))
        .ok_or_else(|| {
            syn::Error::new_spanned(
                name,
                "AutoRegisterSolution derive macro requires #[aoc(day = N)] attribute",
            )
        })?;

    let mut day: Option<u8> = None;

    aoc_attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("day") {
            let value: Lit = meta.value()?.parse()?;
            match value {
                Lit::Int(lit_int) => {
                    let parsed: u8 = lit_int.base10_parse()?;
                    if parsed == 0 {
                        return Err(syn::Error::new_spanned(lit_int, "day must be at least 1"));
                    }
                    day = Some(parsed);
                }
                other => return Err(syn::Error::new_spanned(other, "day must be an integer")),
            }
            Ok(())
        } else {
            Err(meta.error("unsupported attribute, expected `day`"))
        }
    })?;

    let day = day.ok_or_else(|| syn::Error::new_spanned(aoc_attr, "missing required `day`"))?;

    let name_str = name.to_string();
    let factory = format_ident!("__aoc_create_{}", name);

    Ok(quote! {
        // Compile-time check that the type implements Solution and Default
        const _: () = {
            trait MustImplementSolution: ::aoc_solver::Solution + ::core::default::Default {}
            impl MustImplementSolution for #name {}
        };

        #[doc(hidden)]
        #[allow(non_snake_case)]
        fn #factory() -> ::std::boxed::Box<dyn ::aoc_solver::Solution> {
            ::std::boxed::Box::new(<#name as ::core::default::Default>::default())
        }

        ::aoc_solver::inventory::submit! {
            ::aoc_solver::SolutionPlugin {
                day: #day,
                name: #name_str,
                create: #factory,
            }
        }
    })
}
