use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// `#[umapper(..)]` attributes accepted on the container.
pub(crate) struct ContainerAttrs {
    pub has_default: bool,
    pub doc: Vec<String>,
}

/// `#[umapper(..)]` attributes accepted on a field.
pub(crate) struct FieldAttrs {
    pub extends: bool,
    pub doc: Vec<String>,
}

pub(crate) fn container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut has_default = false;
    for attr in umapper_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                has_default = true;
                Ok(())
            } else if meta.path.is_ident("extends") {
                Err(meta.error("`extends` is a field attribute, not a container attribute"))
            } else {
                Err(meta.error("unknown umapper container attribute"))
            }
        })?;
    }
    Ok(ContainerAttrs {
        has_default,
        doc: doc_lines(attrs),
    })
}

pub(crate) fn field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut extends = false;
    for attr in umapper_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("extends") {
                extends = true;
                Ok(())
            } else if meta.path.is_ident("default") {
                Err(meta.error("`default` is a container attribute, not a field attribute"))
            } else {
                Err(meta.error("unknown umapper field attribute"))
            }
        })?;
    }
    Ok(FieldAttrs {
        extends,
        doc: doc_lines(attrs),
    })
}

fn umapper_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("umapper"))
}

/// Collects `#[doc = "..."]` lines, i.e. doc comments, verbatim (they tend
/// to start with a space).
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => Some(lit.value()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}
