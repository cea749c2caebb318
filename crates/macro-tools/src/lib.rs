use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod builder;
mod deref;
mod fields;

/// Forward `Deref`/`DerefMut` to the field marked `#[deref]`.
#[proc_macro_derive(Deref, attributes(deref))]
pub fn deref(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    deref::macro_deref(input)
}

/// Generate `XBuilder` plus `Default` for both the struct and its builder.
///
/// Field attributes:
/// * `#[default = 0.5]` literal initial value
/// * `#[default(expr)]` any other expression
/// * `#[builder(skip)]` no setter on the builder
///
/// Fields without a default start from `Default::default()`.
#[proc_macro_derive(Builder, attributes(default, builder, shared))]
pub fn builder(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    builder::macro_builder(input)
}

/// Generate accessors.
///
/// `#[r]` getter (by value for primitives or with `copy`), `#[w]` `_mut` getter,
/// `#[w(set)]` setter, `#[w(reducer)]` setter taking a closure. Both accept
/// `vis(...)`; `#[shared(skip)]` opts a field out. Put them on the struct to
/// apply to every field.
#[proc_macro_derive(Fields, attributes(shared, r, w))]
pub fn fields(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    fields::macro_fields(input)
}
