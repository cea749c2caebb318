use proc_macro::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Fields};

pub fn macro_deref(input: DeriveInput) -> TokenStream {
    let ident = input.ident;
    let generics = input.generics;

    let Data::Struct(data) = input.data else {
        return syn::Error::new(ident.span(), "Deref can only be applied to structs")
            .into_compile_error()
            .into();
    };

    let Fields::Named(fields) = data.fields else {
        return syn::Error::new(ident.span(), "Deref needs named fields")
            .into_compile_error()
            .into();
    };

    let mut marked = fields
        .named
        .iter()
        .filter(|field| field.attrs.iter().any(|attr| attr.path().is_ident("deref")));

    let Some(target) = marked.next() else {
        return syn::Error::new(ident.span(), "mark exactly one field with #[deref]")
            .into_compile_error()
            .into();
    };

    if let Some(extra) = marked.next() {
        return syn::Error::new(extra.span(), "only one field can be marked with #[deref]")
            .into_compile_error()
            .into();
    }

    let target_ident = &target.ident;
    let target_ty = &target.ty;

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote!(
        impl #impl_generics core::ops::Deref for #ident #ty_generics #where_clause {
            type Target = #target_ty;

            fn deref(&self) -> &Self::Target {
                &self.#target_ident
            }
        }

        impl #impl_generics core::ops::DerefMut for #ident #ty_generics #where_clause {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.#target_ident
            }
        }
    )
    .into()
}
