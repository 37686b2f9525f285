//! Derive macros for the Reflow framework
//!
//! This crate provides procedural macros to reduce boilerplate when building
//! unidirectional state containers with Reflow.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Implements `reflow_core::action::Action` for action enums
//!
//! # Example
//!
//! ```ignore
//! use reflow_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[init]
//!     Init,
//!     AddTodo { id: u64, text: String },
//!     ToggleTodo { id: u64 },
//! }
//!
//! // Generated trait methods:
//! assert_eq!(TodoAction::ToggleTodo { id: 1 }.action_type(), "TOGGLE_TODO");
//! assert!(matches!(TodoAction::init(), TodoAction::Init));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, Lit, Meta};

/// Derive macro for Action enums
///
/// Implements `reflow_core::action::Action`:
/// - `init()` - Returns the variant marked `#[init]`
/// - `action_type()` - Returns the variant name in `SCREAMING_SNAKE_CASE`
///
/// # Attributes
///
/// - `#[init]` - Mark the no-op variant used to initialize a store (exactly one,
///   must be a unit variant)
/// - `#[action_type = "NAME"]` - Override the generated action type name
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - No variant, or more than one variant, is marked `#[init]`
/// - The `#[init]` variant carries fields
/// - `#[action_type]` is not a string literal
///
/// # Example
///
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum FilterAction {
///     #[init]
///     Init,
///
///     #[action_type = "SET_VISIBILITY_FILTER"]
///     SetFilter { filter: Filter },
/// }
///
/// let action = FilterAction::SetFilter { filter: Filter::ShowAll };
/// assert_eq!(action.action_type(), "SET_VISIBILITY_FILTER");
/// ```
#[proc_macro_derive(Action, attributes(init, action_type))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(
            input,
            "#[derive(Action)] can only be used on enums"
        )
        .to_compile_error()
        .into();
    };

    let mut init_variant = None;
    let mut action_type_arms = Vec::new();

    for variant in &data_enum.variants {
        let variant_name = &variant.ident;

        if has_attribute(&variant.attrs, "init") {
            if init_variant.is_some() {
                return syn::Error::new_spanned(
                    variant,
                    "Only one variant can be marked #[init]"
                )
                .to_compile_error()
                .into();
            }
            if !matches!(variant.fields, Fields::Unit) {
                return syn::Error::new_spanned(
                    variant,
                    "The #[init] variant must be a unit variant"
                )
                .to_compile_error()
                .into();
            }
            init_variant = Some(variant_name);
        }

        let type_name = match action_type_override(&variant.attrs) {
            Ok(Some(type_name)) => type_name,
            Ok(None) => screaming_snake_case(&variant_name.to_string()),
            Err(error) => return error.to_compile_error().into(),
        };

        action_type_arms.push(match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } => #type_name, },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) => #type_name, },
            Fields::Unit => quote! { Self::#variant_name => #type_name, },
        });
    }

    let Some(init_variant) = init_variant else {
        return syn::Error::new_spanned(
            name,
            "#[derive(Action)] requires one unit variant marked #[init]"
        )
        .to_compile_error()
        .into();
    };

    let expanded = quote! {
        impl #impl_generics ::reflow_core::action::Action for #name #ty_generics #where_clause {
            fn init() -> Self {
                Self::#init_variant
            }

            fn action_type(&self) -> &'static str {
                match self {
                    #(#action_type_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident(name)
    })
}

/// Reads `#[action_type = "NAME"]` if present
fn action_type_override(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    for attr in attrs {
        if !attr.path().is_ident("action_type") {
            continue;
        }

        if let Meta::NameValue(meta) = &attr.meta {
            if let Expr::Lit(expr) = &meta.value {
                if let Lit::Str(value) = &expr.lit {
                    return Ok(Some(value.value()));
                }
            }
        }

        return Err(syn::Error::new_spanned(
            attr,
            "expected #[action_type = \"NAME\"]"
        ));
    }

    Ok(None)
}

/// Converts a `PascalCase` identifier to `SCREAMING_SNAKE_CASE`
///
/// Acronym runs stay together: `HTTPRequest` becomes `HTTP_REQUEST`.
fn screaming_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let acronym_end = prev.is_uppercase() && next_is_lower;
            if prev.is_lowercase() || prev.is_ascii_digit() || acronym_end {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }

    out
}
