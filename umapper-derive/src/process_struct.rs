use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Fields, GenericArgument, Ident, PathArguments, PathSegment, Type, TypePath,
};

use crate::attributes::{container_attrs, field_attrs};

/// One mappable field of the struct, classified by its value discipline.
struct MappedField<'a> {
    ident: &'a Ident,
    /// field name as exposed in the shape (raw-identifier prefix stripped)
    name: String,
    getter: Ident,
    /// the value type carried when mapped: the `Option` payload for
    /// nullable fields, the full type otherwise
    payload: &'a Type,
    nullable: bool,
    sequence: bool,
    doc: Vec<String>,
}

/// The embedded ancestor field, if the struct extends a type.
struct AncestorField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
}

pub(crate) fn process(input: &DeriveInput) -> syn::Result<TokenStream> {
    if !input.generics.params.is_empty() || input.generics.where_clause.is_some() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Mappable cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => Some(&named.named),
            Fields::Unit => None,
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &data.fields,
                    "Mappable cannot be derived for tuple structs",
                ));
            }
        },
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "Mappable cannot be derived for enums",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Mappable cannot be derived for unions",
            ));
        }
    };

    let container = container_attrs(&input.attrs)?;

    let mut mapped: Vec<MappedField<'_>> = Vec::new();
    let mut ancestor: Option<AncestorField<'_>> = None;

    for field in fields.into_iter().flatten() {
        let attrs = field_attrs(&field.attrs)?;
        let ident = field.ident.as_ref().expect("named field");

        if attrs.extends {
            if ancestor.is_some() {
                return Err(syn::Error::new_spanned(
                    ident,
                    "at most one field can be marked #[umapper(extends)]",
                ));
            }
            if option_inner(&field.ty).is_some() || is_vec(&field.ty) {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    "an #[umapper(extends)] field must embed the ancestor directly",
                ));
            }
            ancestor = Some(AncestorField {
                ident,
                ty: &field.ty,
            });
            continue;
        }

        let name = unraw(ident);
        let (payload, nullable) = match option_inner(&field.ty) {
            Some(inner) => (inner, true),
            None => (&field.ty, false),
        };
        let sequence = is_vec(payload);
        mapped.push(MappedField {
            ident,
            getter: format_ident!("__get_{}", name),
            name,
            payload,
            nullable,
            sequence,
            doc: attrs.doc,
        });
    }

    let struct_ident = &input.ident;
    let type_name = unraw(struct_ident);

    let getters = mapped.iter().map(|field| gen_getter(struct_ident, field));
    let field_defs: Vec<TokenStream> = mapped.iter().map(gen_field_def).collect();
    let param_defs: Vec<TokenStream> = mapped.iter().map(gen_param_def).collect();
    let construct_expr = gen_construct_expr(struct_ident, &mapped, ancestor.as_ref());
    // field-less types ignore the argument set entirely
    let args_ident = if mapped.is_empty() && ancestor.is_none() {
        format_ident!("_args")
    } else {
        format_ident!("args")
    };

    let ancestor_fns = ancestor.as_ref().map(|anc| {
        let anc_ty = anc.ty;
        let anc_ident = anc.ident;
        quote! {
            fn __ancestor_shape() -> &'static ::umapper::Shape {
                <#anc_ty as ::umapper::Mappable>::SHAPE
            }
            fn __project_ancestor(
                instance: &dyn ::core::any::Any,
            ) -> ::core::option::Option<&dyn ::core::any::Any> {
                let value = instance.downcast_ref::<#struct_ident>()?;
                ::core::option::Option::Some(&value.#anc_ident as &dyn ::core::any::Any)
            }
        }
    });

    let default_fn = container.has_default.then(|| {
        quote! {
            fn __default() -> ::umapper::BoxedValue {
                ::umapper::boxed(<#struct_ident as ::core::default::Default>::default())
            }
        }
    });

    let maybe_doc = doc_call(&container.doc);
    let fields_call = (!field_defs.is_empty()).then(|| {
        quote! { .fields(&const { [#(#field_defs),*] }) }
    });
    let params_call = (!param_defs.is_empty()).then(|| {
        quote! { .params(&const { [#(#param_defs),*] }) }
    });
    let ancestor_call = ancestor.as_ref().map(|_| {
        quote! {
            .ancestor(
                ::umapper::AncestorLink::builder()
                    .shape(__ancestor_shape)
                    .project(__project_ancestor)
                    .build(),
            )
        }
    });
    let default_call = container.has_default.then(|| quote! { .default_fn(__default) });

    Ok(quote! {
        #[automatically_derived]
        impl ::umapper::Mappable for #struct_ident {
            const SHAPE: &'static ::umapper::Shape = &const {
                #(#getters)*
                #ancestor_fns
                fn __construct(
                    #args_ident: &::umapper::ArgumentSet<'_>,
                ) -> ::core::result::Result<::umapper::BoxedValue, ::umapper::ConstructError> {
                    ::core::result::Result::Ok(::umapper::boxed(#construct_expr))
                }
                #default_fn
                ::umapper::Shape::builder()
                    .type_name(#type_name)
                    #maybe_doc
                    #fields_call
                    #params_call
                    #ancestor_call
                    .vtable(&const {
                        ::umapper::ShapeVTable::builder()
                            .construct(__construct)
                            #default_call
                            .build()
                    })
                    .build()
            };
        }
    })
}

/// Emits the value accessor for one field. Sequences are copied
/// element-wise into a fresh container; `None` options read as `Absent`.
fn gen_getter(struct_ident: &Ident, field: &MappedField<'_>) -> TokenStream {
    let getter = &field.getter;
    let ident = field.ident;
    let value_expr = match (field.nullable, field.sequence) {
        (false, false) => quote! {
            ::umapper::FieldValue::present(::core::clone::Clone::clone(&value.#ident))
        },
        (false, true) => quote! {
            ::umapper::FieldValue::present(value.#ident.to_vec())
        },
        (true, false) => quote! {
            match &value.#ident {
                ::core::option::Option::Some(inner) => {
                    ::umapper::FieldValue::present(::core::clone::Clone::clone(inner))
                }
                ::core::option::Option::None => ::umapper::FieldValue::Absent,
            }
        },
        (true, true) => quote! {
            match &value.#ident {
                ::core::option::Option::Some(inner) => {
                    ::umapper::FieldValue::present(inner.to_vec())
                }
                ::core::option::Option::None => ::umapper::FieldValue::Absent,
            }
        },
    };
    quote! {
        fn #getter(
            instance: &dyn ::core::any::Any,
        ) -> ::core::option::Option<::umapper::FieldValue> {
            let value = instance.downcast_ref::<#struct_ident>()?;
            ::core::option::Option::Some(#value_expr)
        }
    }
}

fn gen_field_def(field: &MappedField<'_>) -> TokenStream {
    let name = &field.name;
    let getter = &field.getter;
    let flags = flags_call(field.nullable, field.sequence);
    let doc = doc_call(&field.doc);
    quote! {
        ::umapper::Field::builder()
            .name(#name)
            #flags
            #doc
            .get(#getter)
            .build()
    }
}

fn gen_param_def(field: &MappedField<'_>) -> TokenStream {
    let name = &field.name;
    let flags = flags_call(field.nullable, field.sequence);
    quote! {
        ::umapper::CtorParam::builder()
            .name(#name)
            #flags
            .build()
    }
}

fn gen_construct_expr(
    struct_ident: &Ident,
    mapped: &[MappedField<'_>],
    ancestor: Option<&AncestorField<'_>>,
) -> TokenStream {
    if mapped.is_empty() && ancestor.is_none() {
        return quote! { #struct_ident {} };
    }
    let inits = mapped.iter().map(|field| {
        let ident = field.ident;
        let name = &field.name;
        let payload = field.payload;
        if field.nullable {
            quote! { #ident: args.optional::<#payload>(#name)? }
        } else {
            quote! { #ident: args.required::<#payload>(#name)? }
        }
    });
    let ancestor_init = ancestor.map(|anc| {
        let ident = anc.ident;
        let ty = anc.ty;
        quote! { #ident: args.construct::<#ty>()? }
    });
    quote! {
        #struct_ident {
            #(#inits,)*
            #ancestor_init
        }
    }
}

fn flags_call(nullable: bool, sequence: bool) -> Option<TokenStream> {
    match (nullable, sequence) {
        (false, false) => None,
        (true, false) => Some(quote! { .flags(::umapper::FieldFlags::NULLABLE) }),
        (false, true) => Some(quote! { .flags(::umapper::FieldFlags::SEQUENCE) }),
        (true, true) => Some(quote! {
            .flags(::umapper::FieldFlags::NULLABLE.union(::umapper::FieldFlags::SEQUENCE))
        }),
    }
}

fn doc_call(doc: &[String]) -> Option<TokenStream> {
    (!doc.is_empty()).then(|| quote! { .doc(&[#(#doc),*]) })
}

fn unraw(ident: &Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").unwrap_or(&name).to_string()
}

fn type_path_last(ty: &Type) -> Option<&PathSegment> {
    if let Type::Path(TypePath { qself: None, path }) = ty {
        path.segments.last()
    } else {
        None
    }
}

fn generic_inner(seg: &PathSegment) -> Option<&Type> {
    if let PathArguments::AngleBracketed(args) = &seg.arguments {
        if args.args.len() == 1 {
            if let GenericArgument::Type(ty) = &args.args[0] {
                return Some(ty);
            }
        }
    }
    None
}

fn option_inner(ty: &Type) -> Option<&Type> {
    let seg = type_path_last(ty)?;
    if seg.ident == "Option" {
        generic_inner(seg)
    } else {
        None
    }
}

fn is_vec(ty: &Type) -> bool {
    type_path_last(ty).is_some_and(|seg| seg.ident == "Vec")
}
