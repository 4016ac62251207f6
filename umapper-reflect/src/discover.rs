use alloc::vec::Vec;

use umapper_core::{CtorParam, Field, Shape};

/// A field found while walking a shape's ancestor chain
#[derive(Clone, Copy, Debug)]
pub struct DiscoveredField {
    /// the field itself
    pub field: &'static Field,
    /// the shape that declares it
    pub shape: &'static Shape,
    /// how many ancestor levels below the starting shape it was declared
    pub depth: usize,
}

/// A constructor parameter found while walking a shape's ancestor chain
#[derive(Clone, Copy, Debug)]
pub struct DiscoveredParam {
    /// the parameter itself
    pub param: &'static CtorParam,
    /// the shape that declares it
    pub shape: &'static Shape,
    /// how many ancestor levels below the starting shape it was declared
    pub depth: usize,
}

/// Collects every field along the shape's ancestor chain into a flat list,
/// most-derived level first, declaration order within each level.
///
/// Duplicate names across levels are kept: callers resolve them with a
/// first-match-wins rule, which is what makes a redeclared name shadow its
/// ancestor.
pub fn discover_fields(shape: &'static Shape) -> Vec<DiscoveredField> {
    let mut fields = Vec::new();
    let mut level = Some(shape);
    let mut depth = 0;
    while let Some(current) = level {
        fields.extend(current.fields.iter().map(|field| DiscoveredField {
            field,
            shape: current,
            depth,
        }));
        level = current.ancestor_shape();
        depth += 1;
    }
    fields
}

/// Collects every constructor parameter along the shape's ancestor chain,
/// with the same ordering guarantee as [`discover_fields`].
pub fn discover_params(shape: &'static Shape) -> Vec<DiscoveredParam> {
    let mut params = Vec::new();
    let mut level = Some(shape);
    let mut depth = 0;
    while let Some(current) = level {
        params.extend(current.params.iter().map(|param| DiscoveredParam {
            param,
            shape: current,
            depth,
        }));
        level = current.ancestor_shape();
        depth += 1;
    }
    params
}
