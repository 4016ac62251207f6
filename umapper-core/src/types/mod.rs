//! Shape, vtable and builder definitions used by umapper

mod field;
pub use field::*;

mod param;
pub use param::*;

use crate::args::{ArgumentSet, ConstructError};
use crate::value::BoxedValue;

/// Descriptor of a data type for mapping purposes.
///
/// A shape lists the type's assignable fields and constructor parameters in
/// declaration order, links to the shape of an embedded ancestor (if the
/// type extends one), and carries a vtable with the construction entry
/// points. Shapes are generated by `#[derive(Mappable)]` and live in static
/// memory; they are never mutated after creation.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct Shape {
    /// Name of the type, without any path prefix
    pub type_name: &'static str,

    /// Fields declared directly on this type, in declaration order.
    /// Does not include ancestor fields; follow [`Shape::ancestor_shape`]
    /// for those.
    pub fields: &'static [Field],

    /// Constructor parameters declared directly on this type, in
    /// declaration order. One per field; the embedded ancestor is
    /// constructed recursively and has no parameter here.
    pub params: &'static [CtorParam],

    /// Link to the embedded ancestor, if this type extends one
    pub ancestor: Option<AncestorLink>,

    /// vtable for construction operations
    pub vtable: &'static ShapeVTable,

    /// doc comments
    pub doc: &'static [&'static str],
}

impl Shape {
    /// Returns a builder for Shape
    pub const fn builder() -> ShapeBuilder {
        ShapeBuilder::new()
    }

    /// Returns the shape of the embedded ancestor, if any
    pub fn ancestor_shape(&self) -> Option<&'static Shape> {
        self.ancestor.as_ref().map(|link| (link.shape)())
    }

    /// Looks up a field declared directly on this type by name.
    /// Ancestor levels are not searched.
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// True if the shape registered a zero-argument constructor
    /// (`#[umapper(default)]`)
    pub fn has_default(&self) -> bool {
        self.vtable.default_fn.is_some()
    }
}

// Shapes are compile-time singletons, one per type, so the type name
// identifies the shape.
impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }
}

impl Eq for Shape {}

impl core::fmt::Display for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.type_name)
    }
}

/// Link from a shape to the shape of its embedded ancestor.
///
/// `project` narrows a live instance of the outer type down to the embedded
/// ancestor value, so ancestor fields can be read off the outer instance.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct AncestorLink {
    /// Shape of the ancestor type (behind a function pointer so shapes can
    /// reference each other from const context)
    pub shape: fn() -> &'static Shape,

    /// Projects an instance of the declaring type to its embedded ancestor
    /// value. Returns `None` if the instance is not of the declaring type.
    pub project: ProjectAncestorFn,
}

impl AncestorLink {
    /// Returns a builder for AncestorLink
    pub const fn builder() -> AncestorLinkBuilder {
        AncestorLinkBuilder::new()
    }
}

/// Projects an instance of a type to its embedded ancestor value
pub type ProjectAncestorFn =
    for<'mem> fn(instance: &'mem dyn core::any::Any) -> Option<&'mem dyn core::any::Any>;

/// Constructs an instance from a fully resolved set of named arguments
pub type ConstructFn = fn(args: &ArgumentSet<'_>) -> Result<BoxedValue, ConstructError>;

/// Constructs an instance with no arguments at all
pub type DefaultFn = fn() -> BoxedValue;

/// Vtable for shape-level construction operations
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct ShapeVTable {
    /// Builds an instance from named arguments
    pub construct: ConstructFn,

    /// Builds an instance with no arguments; present only for types
    /// annotated `#[umapper(default)]`
    pub default_fn: Option<DefaultFn>,
}

impl ShapeVTable {
    /// Returns a builder for ShapeVTable
    pub const fn builder() -> ShapeVTableBuilder {
        ShapeVTableBuilder::new()
    }
}

/// Builder for Shape
pub struct ShapeBuilder {
    type_name: Option<&'static str>,
    fields: &'static [Field],
    params: &'static [CtorParam],
    ancestor: Option<AncestorLink>,
    vtable: Option<&'static ShapeVTable>,
    doc: &'static [&'static str],
}

impl ShapeBuilder {
    /// Creates a new ShapeBuilder
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            type_name: None,
            fields: &[],
            params: &[],
            ancestor: None,
            vtable: None,
            doc: &[],
        }
    }

    /// Sets the type name for the Shape
    pub const fn type_name(mut self, type_name: &'static str) -> Self {
        self.type_name = Some(type_name);
        self
    }

    /// Sets the fields for the Shape
    pub const fn fields(mut self, fields: &'static [Field]) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the constructor parameters for the Shape
    pub const fn params(mut self, params: &'static [CtorParam]) -> Self {
        self.params = params;
        self
    }

    /// Sets the ancestor link for the Shape
    pub const fn ancestor(mut self, ancestor: AncestorLink) -> Self {
        self.ancestor = Some(ancestor);
        self
    }

    /// Sets the vtable for the Shape
    pub const fn vtable(mut self, vtable: &'static ShapeVTable) -> Self {
        self.vtable = Some(vtable);
        self
    }

    /// Sets the doc comments for the Shape
    pub const fn doc(mut self, doc: &'static [&'static str]) -> Self {
        self.doc = doc;
        self
    }

    /// Builds the Shape
    pub const fn build(self) -> Shape {
        Shape {
            type_name: self.type_name.unwrap(),
            fields: self.fields,
            params: self.params,
            ancestor: self.ancestor,
            vtable: self.vtable.unwrap(),
            doc: self.doc,
        }
    }
}

/// Builder for AncestorLink
pub struct AncestorLinkBuilder {
    shape: Option<fn() -> &'static Shape>,
    project: Option<ProjectAncestorFn>,
}

impl AncestorLinkBuilder {
    /// Creates a new AncestorLinkBuilder
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            shape: None,
            project: None,
        }
    }

    /// Sets the ancestor shape accessor for the AncestorLink
    pub const fn shape(mut self, shape: fn() -> &'static Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Sets the projection function for the AncestorLink
    pub const fn project(mut self, project: ProjectAncestorFn) -> Self {
        self.project = Some(project);
        self
    }

    /// Builds the AncestorLink
    pub const fn build(self) -> AncestorLink {
        AncestorLink {
            shape: self.shape.unwrap(),
            project: self.project.unwrap(),
        }
    }
}

/// Builder for ShapeVTable
pub struct ShapeVTableBuilder {
    construct: Option<ConstructFn>,
    default_fn: Option<DefaultFn>,
}

impl ShapeVTableBuilder {
    /// Creates a new ShapeVTableBuilder
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            construct: None,
            default_fn: None,
        }
    }

    /// Sets the construct function for the ShapeVTable
    pub const fn construct(mut self, construct: ConstructFn) -> Self {
        self.construct = Some(construct);
        self
    }

    /// Sets the default_fn function for the ShapeVTable
    pub const fn default_fn(mut self, default_fn: DefaultFn) -> Self {
        self.default_fn = Some(default_fn);
        self
    }

    /// Builds the ShapeVTable
    pub const fn build(self) -> ShapeVTable {
        ShapeVTable {
            construct: self.construct.unwrap(),
            default_fn: self.default_fn,
        }
    }
}
