use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{parenthesized, Attribute, Data, DeriveInput, Field, Ident, Type, Visibility};

// types returned by value from a plain `#[r]` getter
const COPY_TYPES: [&str; 17] = [
    "bool", "u8", "u16", "u32", "u64", "u128", "usize", "i8", "i16", "i32", "i64", "i128",
    "f32", "f64", "FloatNum", "ID", "Vector",
];

#[derive(Clone)]
struct ReadOption {
    vis: Visibility,
    copy: bool,
}

#[derive(Clone)]
enum WriteKind {
    Mut,
    Set,
    Reducer,
}

#[derive(Clone)]
struct WriteOption {
    vis: Visibility,
    kind: WriteKind,
}

fn find_attr<'a>(attrs: &'a [Attribute], ident: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(ident))
}

fn is_skipped(attrs: &[Attribute]) -> bool {
    attrs
        .iter()
        .filter(|attr| ["shared", "r", "w"].iter().any(|k| attr.path().is_ident(k)))
        .any(|attr| {
            let mut skip = false;
            let _ = attr.parse_nested_meta(|meta| {
                skip |= meta.path.is_ident("skip");
                Ok(())
            });
            skip
        })
}

fn parse_read(attrs: &[Attribute], default_vis: &Visibility) -> Option<ReadOption> {
    let attr = find_attr(attrs, "r")?;
    let mut option = ReadOption {
        vis: default_vis.clone(),
        copy: false,
    };
    let _ = attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("vis") {
            let content;
            parenthesized!(content in meta.input);
            option.vis = content.parse()?;
        } else if meta.path.is_ident("copy") {
            option.copy = true;
        }
        Ok(())
    });
    Some(option)
}

fn parse_write(attrs: &[Attribute], default_vis: &Visibility) -> Option<WriteOption> {
    let attr = find_attr(attrs, "w")?;
    let mut option = WriteOption {
        vis: default_vis.clone(),
        kind: WriteKind::Mut,
    };
    let _ = attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("reducer") {
            option.kind = WriteKind::Reducer;
        } else if meta.path.is_ident("set") {
            option.kind = WriteKind::Set;
        } else if meta.path.is_ident("vis") {
            let content;
            parenthesized!(content in meta.input);
            option.vis = content.parse()?;
        }
        Ok(())
    });
    Some(option)
}

fn is_copy_type(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => {
            let name = path.into_token_stream().to_string();
            COPY_TYPES.iter().any(|t| *t == name)
        }
        _ => false,
    }
}

fn read_method(field: &Field, ident: &Ident, option: ReadOption) -> proc_macro2::TokenStream {
    let ReadOption { vis, copy } = option;
    let ty = &field.ty;
    if copy || is_copy_type(ty) {
        quote!(
            #vis fn #ident(&self) -> #ty {
                self.#ident
            }
        )
    } else {
        quote!(
            #vis fn #ident(&self) -> &#ty {
                &self.#ident
            }
        )
    }
}

fn write_method(field: &Field, ident: &Ident, option: WriteOption) -> proc_macro2::TokenStream {
    let WriteOption { vis, kind } = option;
    let ty = &field.ty;
    match kind {
        WriteKind::Mut => {
            let method = Ident::new(&format!("{}_mut", ident), ident.span());
            quote!(
                #vis fn #method(&mut self) -> &mut #ty {
                    &mut self.#ident
                }
            )
        }
        WriteKind::Set => {
            let method = Ident::new(&format!("set_{}", ident), ident.span());
            quote!(
                #vis fn #method(&mut self, value: impl Into<#ty>) -> &mut Self {
                    self.#ident = value.into();
                    self
                }
            )
        }
        WriteKind::Reducer => {
            let method = Ident::new(&format!("set_{}", ident), ident.span());
            quote!(
                #vis fn #method(&mut self, reducer: impl FnOnce(#ty) -> #ty) -> &mut Self {
                    self.#ident = reducer(core::mem::take(&mut self.#ident));
                    self
                }
            )
        }
    }
}

pub fn macro_fields(input: DeriveInput) -> TokenStream {
    let ident = input.ident;
    let generics = input.generics;
    let input_vis = input.vis;

    let struct_read = parse_read(&input.attrs, &input_vis);
    let struct_write = parse_write(&input.attrs, &input_vis);

    let Data::Struct(data) = input.data else {
        return syn::Error::new(ident.span(), "Fields can only be applied to structs")
            .into_compile_error()
            .into();
    };

    let mut methods = Vec::new();

    for field in data.fields.iter().filter(|field| !is_skipped(&field.attrs)) {
        let Some(field_ident) = field.ident.as_ref() else {
            return syn::Error::new(ident.span(), "Fields needs named fields")
                .into_compile_error()
                .into();
        };

        if let Some(option) =
            parse_read(&field.attrs, &input_vis).or_else(|| struct_read.clone())
        {
            methods.push(read_method(field, field_ident, option));
        }

        if let Some(option) =
            parse_write(&field.attrs, &input_vis).or_else(|| struct_write.clone())
        {
            methods.push(write_method(field, field_ident, option));
        }
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote!(
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#methods)*
        }
    )
    .into()
}
