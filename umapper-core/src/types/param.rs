use super::FieldFlags;

/// Describes one parameter of a mappable type's constructor
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct CtorParam {
    /// name of the parameter (same as the field it initializes)
    pub name: &'static str,

    /// flags for the parameter; NULLABLE parameters accept an absent value
    pub flags: FieldFlags,
}

impl CtorParam {
    /// Returns a builder for CtorParam
    pub const fn builder() -> CtorParamBuilder {
        CtorParamBuilder::new()
    }

    /// True if the parameter accepts an absent value
    pub fn is_nullable(&self) -> bool {
        self.flags.contains(FieldFlags::NULLABLE)
    }
}

/// Builder for CtorParam
pub struct CtorParamBuilder {
    name: Option<&'static str>,
    flags: Option<FieldFlags>,
}

impl CtorParamBuilder {
    /// Creates a new CtorParamBuilder
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            name: None,
            flags: None,
        }
    }

    /// Sets the name for the CtorParam
    pub const fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the flags for the CtorParam
    pub const fn flags(mut self, flags: FieldFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Builds the CtorParam
    pub const fn build(self) -> CtorParam {
        CtorParam {
            name: self.name.unwrap(),
            flags: match self.flags {
                Some(flags) => flags,
                None => FieldFlags::EMPTY,
            },
        }
    }
}
