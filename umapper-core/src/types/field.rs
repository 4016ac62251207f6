use crate::value::FieldValue;
use bitflags::bitflags;

/// Describes an assignable field of a mappable type
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct Field {
    /// key for the struct field
    pub name: &'static str,

    /// flags for the field (nullable, sequence)
    pub flags: FieldFlags,

    /// doc comments
    pub doc: &'static [&'static str],

    /// Reads the field's current value off a live instance of the declaring
    /// type, as an owned copy. Returns `None` if the instance is not of the
    /// declaring type.
    pub get: GetValueFn,
}

/// Reads a field's current value off a live instance of the declaring type.
///
/// The returned value is an owned copy; sequence fields are copied
/// element-wise into a freshly allocated container, preserving explicit
/// absent elements.
pub type GetValueFn = for<'mem> fn(instance: &'mem dyn core::any::Any) -> Option<FieldValue>;

impl Field {
    /// Returns a builder for Field
    pub const fn builder() -> FieldBuilder {
        FieldBuilder::new()
    }

    /// True if the field is an `Option` and may hold no value
    pub fn is_nullable(&self) -> bool {
        self.flags.contains(FieldFlags::NULLABLE)
    }

    /// True if the field holds a sequence
    pub fn is_sequence(&self) -> bool {
        self.flags.contains(FieldFlags::SEQUENCE)
    }
}

/// Builder for Field
pub struct FieldBuilder {
    name: Option<&'static str>,
    flags: Option<FieldFlags>,
    doc: &'static [&'static str],
    get: Option<GetValueFn>,
}

impl FieldBuilder {
    /// Creates a new FieldBuilder
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            name: None,
            flags: None,
            doc: &[],
            get: None,
        }
    }

    /// Sets the name for the Field
    pub const fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the flags for the Field
    pub const fn flags(mut self, flags: FieldFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Sets the doc comments for the Field
    pub const fn doc(mut self, doc: &'static [&'static str]) -> Self {
        self.doc = doc;
        self
    }

    /// Sets the value accessor for the Field
    pub const fn get(mut self, get: GetValueFn) -> Self {
        self.get = Some(get);
        self
    }

    /// Builds the Field
    pub const fn build(self) -> Field {
        Field {
            name: self.name.unwrap(),
            flags: match self.flags {
                Some(flags) => flags,
                None => FieldFlags::EMPTY,
            },
            doc: self.doc,
            get: self.get.unwrap(),
        }
    }
}

bitflags! {
    /// Flags describing the value discipline of a field or constructor
    /// parameter
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u64 {
        /// An empty set of flags
        const EMPTY = 0;

        /// The field is an `Option` and may hold no value
        const NULLABLE = 1 << 0;

        /// The field holds a sequence; matched values are copied
        /// element-wise into a fresh container
        const SEQUENCE = 1 << 1;
    }
}

impl Default for FieldFlags {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl core::fmt::Display for FieldFlags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }

        let flags = [
            (FieldFlags::NULLABLE, "nullable"),
            (FieldFlags::SEQUENCE, "sequence"),
        ];

        let mut is_first = true;
        for (flag, name) in flags {
            if self.contains(flag) {
                if !is_first {
                    write!(f, ", ")?;
                }
                is_first = false;
                write!(f, "{}", name)?;
            }
        }

        Ok(())
    }
}
