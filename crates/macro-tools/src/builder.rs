use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Expr, Field, Ident, Meta};

struct BuilderField<'a> {
    field: &'a Field,
    default: Option<Expr>,
    skip_setter: bool,
}

impl<'a> BuilderField<'a> {
    fn parse(field: &'a Field) -> Self {
        Self {
            field,
            default: default_expr(&field.attrs),
            skip_setter: is_skipped(&field.attrs),
        }
    }
}

fn default_expr(attrs: &[Attribute]) -> Option<Expr> {
    attrs
        .iter()
        .find(|attr| attr.path().is_ident("default"))
        .and_then(|attr| match &attr.meta {
            Meta::Path(_) => None,
            Meta::NameValue(meta) => Some(meta.value.clone()),
            Meta::List(list) => list.parse_args().ok(),
        })
}

fn is_skipped(attrs: &[Attribute]) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("builder") || attr.path().is_ident("shared"))
        .any(|attr| {
            let mut skip = false;
            let _ = attr.parse_nested_meta(|meta| {
                skip |= meta.path.is_ident("skip");
                Ok(())
            });
            skip
        })
}

pub fn macro_builder(input: DeriveInput) -> TokenStream {
    let origin_ident = input.ident;
    let generics = input.generics;
    let vis = input.vis;

    let Data::Struct(data) = input.data else {
        return syn::Error::new(origin_ident.span(), "Builder can only be applied to structs")
            .into_compile_error()
            .into();
    };

    let ident = Ident::new(&format!("{}Builder", origin_ident), origin_ident.span());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields: Vec<_> = data.fields.iter().map(BuilderField::parse).collect();

    let declared = fields.iter().map(|BuilderField { field, .. }| {
        let field_ident = &field.ident;
        let ty = &field.ty;
        quote!(#field_ident: #ty,)
    });

    let defaults: Vec<_> = fields
        .iter()
        .map(|BuilderField { field, default, .. }| {
            let field_ident = &field.ident;
            match default {
                Some(expr) => quote!(#field_ident: #expr,),
                None => quote!(#field_ident: Default::default(),),
            }
        })
        .collect();

    let moved = fields.iter().map(|BuilderField { field, .. }| {
        let field_ident = &field.ident;
        quote!(#field_ident: value.#field_ident,)
    });

    let setters = fields
        .iter()
        .filter(|field| !field.skip_setter)
        .map(|BuilderField { field, .. }| {
            let field_ident = &field.ident;
            let ty = &field.ty;
            quote!(
                pub fn #field_ident(mut self, value: impl Into<#ty>) -> Self {
                    self.#field_ident = value.into();
                    self
                }
            )
        });

    quote!(
        #[derive(Clone, Debug)]
        #vis struct #ident #generics #where_clause {
            #(#declared)*
        }

        impl #impl_generics Default for #ident #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#defaults)*
                }
            }
        }

        impl #impl_generics Default for #origin_ident #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#defaults)*
                }
            }
        }

        impl #impl_generics From<#ident #ty_generics> for #origin_ident #ty_generics #where_clause {
            fn from(value: #ident #ty_generics) -> Self {
                Self {
                    #(#moved)*
                }
            }
        }

        impl #impl_generics #ident #ty_generics #where_clause {
            pub fn new() -> Self {
                Self::default()
            }

            #(#setters)*
        }
    )
    .into()
}
