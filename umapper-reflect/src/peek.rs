use core::any::Any;

use umapper_core::{Field, FieldValue, Mappable, Shape};

use crate::{InternalCause, MapperError};

/// Read-only view over a live instance paired with its shape.
///
/// A peek always refers to one level of an ancestor chain: reading a field
/// declared on an ancestor means first descending to that level with
/// [`Peek::at_depth`].
#[derive(Clone, Copy)]
pub struct Peek<'mem> {
    value: &'mem dyn Any,
    shape: &'static Shape,
}

impl core::fmt::Debug for Peek<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Peek").finish_non_exhaustive()
    }
}

impl<'mem> Peek<'mem> {
    /// Wraps a live instance of a mappable type
    pub fn new<S: Mappable>(value: &'mem S) -> Self {
        Self {
            value: value as &'mem dyn Any,
            shape: S::SHAPE,
        }
    }

    /// Returns the shape of the viewed level
    #[inline(always)]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// View over the embedded ancestor, if this level declares one
    pub fn ancestor(&self) -> Result<Option<Peek<'mem>>, MapperError> {
        let Some(link) = &self.shape.ancestor else {
            return Ok(None);
        };
        let value = (link.project)(self.value).ok_or(MapperError::Internal {
            shape: self.shape,
            cause: InternalCause::NotAnInstance {
                expected: self.shape.type_name,
            },
        })?;
        Ok(Some(Peek {
            value,
            shape: (link.shape)(),
        }))
    }

    /// Descends `depth` ancestor levels; depth 0 is this level itself
    pub fn at_depth(&self, depth: usize) -> Result<Peek<'mem>, MapperError> {
        let mut current = *self;
        for level in 0..depth {
            current = current.ancestor()?.ok_or(MapperError::Internal {
                shape: self.shape,
                cause: InternalCause::MissingAncestor { depth: level + 1 },
            })?;
        }
        Ok(current)
    }

    /// Reads the current value of a field declared at this level
    pub fn read(&self, field: &Field) -> Result<FieldValue, MapperError> {
        (field.get)(self.value).ok_or(MapperError::Internal {
            shape: self.shape,
            cause: InternalCause::NotAnInstance {
                expected: self.shape.type_name,
            },
        })
    }
}
