use std::collections::HashSet;

use darling::{ast, FromDeriveInput, FromField};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use proc_macro_error::{abort, abort_call_site};
use quote::quote;
use syn::{parse_macro_input, Data, DataStruct, DeriveInput, Fields, Generics, Ident, Type};

#[derive(FromDeriveInput)]
#[darling(attributes(db))]
struct EntityInput {
    ident: Ident,
    generics: Generics,
    data: ast::Data<(), EntityField>,
}

#[derive(FromField)]
#[darling(attributes(db))]
struct EntityField {
    ident: Option<Ident>,
    ty: Type,
    #[darling(default)]
    column: Option<String>,
    #[darling(default)]
    flatten: bool,
    #[darling(default)]
    skip: bool,
}

enum Mapping<'a> {
    Column(&'a str),
    Flatten,
    Skip,
}

impl EntityField {
    fn ident(&self) -> &Ident {
        match &self.ident {
            Some(ident) => ident,
            None => abort_call_site!("Entity can only be derived for structs with named fields"),
        }
    }

    fn mapping(&self) -> Mapping<'_> {
        let ident = self.ident();

        match (self.column.as_deref(), self.flatten, self.skip) {
            (None, false, false) | (None, false, true) => Mapping::Skip,
            (Some(_), _, true) | (None, true, true) => {
                abort!(ident, "#[db(skip)] cannot be combined with other db options")
            }
            (Some(_), true, false) => {
                abort!(ident, "#[db(column)] and #[db(flatten)] are mutually exclusive")
            }
            (Some(""), false, false) => abort!(ident, "column name cannot be empty"),
            (Some(name), false, false) => Mapping::Column(name),
            (None, true, false) => Mapping::Flatten,
        }
    }
}

pub fn entity_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if !matches!(input.data, Data::Struct(DataStruct { fields: Fields::Named(_), .. })) {
        abort!(input.ident, "Entity can only be derived for structs with named fields");
    }

    let entity = match EntityInput::from_derive_input(&input) {
        Ok(entity) => entity,
        Err(e) => return e.write_errors().into(),
    };

    expand(&entity).into()
}

fn expand(entity: &EntityInput) -> TokenStream2 {
    let fields = match entity.data.as_ref().take_struct() {
        Some(fields) => fields.fields,
        None => abort_call_site!("Entity can only be derived for structs"),
    };

    check_duplicate_columns(&fields);

    let descriptor_steps = fields.iter()
        .map(|field| descriptor_step(field))
        .collect::<TokenStream2>();

    let bind_steps = fields.iter()
        .map(|field| bind_step(field))
        .collect::<TokenStream2>();

    let ident = &entity.ident;
    let name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = entity.generics.split_for_impl();

    quote! {
        impl #impl_generics ::structinsert::Entity for #ident #ty_generics #where_clause {
            fn descriptor() -> ::structinsert::Descriptor {
                ::structinsert::Descriptor::new(#name)
                    #descriptor_steps
            }

            #[allow(unused_variables)]
            fn bind(&self, row: &mut ::structinsert::Row) {
                #bind_steps
            }
        }

        impl #impl_generics ::structinsert::Insertable for #ident #ty_generics #where_clause {
            fn shape(&self) -> ::structinsert::Shape<'_> {
                ::structinsert::Shape::Record(self)
            }

            fn fixed_layout() -> bool {
                true
            }
        }
    }
}

fn check_duplicate_columns(fields: &[&EntityField]) {
    let mut seen = HashSet::new();

    for field in fields {
        if let Mapping::Column(name) = field.mapping() {
            if !seen.insert(name) {
                abort!(field.ident(), "column `{}` is mapped more than once", name);
            }
        }
    }
}

fn descriptor_step(field: &EntityField) -> TokenStream2 {
    let ty = &field.ty;

    match field.mapping() {
        Mapping::Column(name) => quote! { .column(#name) },
        Mapping::Flatten => quote! {
            .group(<#ty as ::structinsert::Entity>::descriptor())
        },
        Mapping::Skip => quote! {},
    }
}

fn bind_step(field: &EntityField) -> TokenStream2 {
    let ident = field.ident();

    match field.mapping() {
        Mapping::Column(_) => quote! {
            row.push(::structinsert::ToValue::to_value(&self.#ident));
        },
        Mapping::Flatten => quote! {
            ::structinsert::Entity::bind(&self.#ident, row);
        },
        Mapping::Skip => quote! {},
    }
}
