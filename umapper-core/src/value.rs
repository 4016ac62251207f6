use alloc::boxed::Box;
use core::any::Any;

/// An owned, type-erased value
pub type BoxedValue = Box<dyn Any>;

/// Type-erases a value. Used by derive-generated constructors.
pub fn boxed<T: Any>(value: T) -> BoxedValue {
    Box::new(value)
}

/// A field value read off a live instance.
///
/// `Absent` is distinct from "field not present": it means the field exists
/// and is an `Option` currently holding `None`.
pub enum FieldValue {
    /// The field holds no value
    Absent,

    /// An owned copy of the field's current value. For `Option` fields this
    /// is the payload, not the `Option` itself; for sequence fields it is a
    /// freshly allocated copy.
    Present(BoxedValue),
}

impl FieldValue {
    /// Wraps an owned copy of a field value. Used by derive-generated
    /// accessors.
    pub fn present<T: Any>(value: T) -> Self {
        FieldValue::Present(Box::new(value))
    }

    /// True if the field held no value
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Borrows the held value, if any
    pub fn as_any(&self) -> Option<&dyn Any> {
        match self {
            FieldValue::Absent => None,
            FieldValue::Present(value) => Some(value.as_ref()),
        }
    }
}

impl core::fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldValue::Absent => write!(f, "Absent"),
            FieldValue::Present(_) => write!(f, "Present(..)"),
        }
    }
}
