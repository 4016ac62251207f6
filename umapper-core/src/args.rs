use alloc::collections::BTreeMap;
use core::any::Any;

use crate::{BoxedValue, Mappable};

/// A named argument resolved for construction
#[derive(Clone, Copy)]
pub enum Arg<'mem> {
    /// Supply the absent value (the parameter must be nullable)
    Null,

    /// Supply a copy of this value
    Value(&'mem dyn Any),
}

impl core::fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Arg::Null => write!(f, "Null"),
            Arg::Value(_) => write!(f, "Value(..)"),
        }
    }
}

/// The full set of named arguments for one construction call.
///
/// Built by the mapping engine, consumed by a shape's generated constructor.
/// Values are borrowed; constructors clone them into place, so a name
/// shadowed across an ancestor chain can feed every parameter slot of that
/// name.
#[derive(Default)]
pub struct ArgumentSet<'mem> {
    entries: BTreeMap<&'static str, Arg<'mem>>,
}

impl<'mem> ArgumentSet<'mem> {
    /// Creates an empty set
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Records an argument under the given name, replacing any previous one
    pub fn insert(&mut self, name: &'static str, arg: Arg<'mem>) {
        self.entries.insert(name, arg);
    }

    /// True if an argument was recorded under the given name
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Looks up an argument by name
    pub fn get(&self, name: &str) -> Option<Arg<'mem>> {
        self.entries.get(name).copied()
    }

    /// Number of recorded arguments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no arguments were recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves a non-nullable parameter: the argument must exist and hold
    /// a value of type `T`.
    pub fn required<T: Any + Clone>(&self, name: &'static str) -> Result<T, ConstructError> {
        match self.get(name) {
            Some(Arg::Value(value)) => {
                value
                    .downcast_ref::<T>()
                    .cloned()
                    .ok_or(ConstructError::TypeMismatch {
                        name,
                        expected: core::any::type_name::<T>(),
                    })
            }
            Some(Arg::Null) | None => Err(ConstructError::MissingArgument { name }),
        }
    }

    /// Resolves a nullable parameter: a missing or null argument yields
    /// `None`, a held value must be of type `T`.
    pub fn optional<T: Any + Clone>(&self, name: &'static str) -> Result<Option<T>, ConstructError> {
        match self.get(name) {
            Some(Arg::Value(value)) => value
                .downcast_ref::<T>()
                .cloned()
                .map(Some)
                .ok_or(ConstructError::TypeMismatch {
                    name,
                    expected: core::any::type_name::<T>(),
                }),
            Some(Arg::Null) | None => Ok(None),
        }
    }

    /// Constructs an embedded ancestor value from this same argument set.
    /// Used by derive-generated constructors of extending types.
    pub fn construct<T: Mappable>(&self) -> Result<T, ConstructError> {
        let instance: BoxedValue = (T::SHAPE.vtable.construct)(self)?;
        instance
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| ConstructError::TypeMismatch {
                name: T::SHAPE.type_name,
                expected: core::any::type_name::<T>(),
            })
    }
}

/// Errors encountered while a generated constructor consumes an
/// [`ArgumentSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConstructError {
    /// A non-nullable parameter had no value in the set
    MissingArgument {
        /// name of the parameter
        name: &'static str,
    },

    /// An argument held a value of the wrong type
    TypeMismatch {
        /// name of the parameter
        name: &'static str,
        /// the type the parameter requires
        expected: &'static str,
    },
}

impl core::fmt::Display for ConstructError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConstructError::MissingArgument { name } => {
                write!(f, "No value for parameter '{}'", name)
            }
            ConstructError::TypeMismatch { name, expected } => {
                write!(f, "Parameter '{}' requires a value of type {}", name, expected)
            }
        }
    }
}

impl core::error::Error for ConstructError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_clones_out_of_the_set() {
        let value = String::from("accounting");
        let mut args = ArgumentSet::new();
        args.insert("dept", Arg::Value(&value));

        let first: String = args.required("dept").unwrap();
        let second: String = args.required("dept").unwrap();
        assert_eq!(first, "accounting");
        assert_eq!(second, "accounting");
    }

    #[test]
    fn required_rejects_null_and_missing() {
        let mut args = ArgumentSet::new();
        args.insert("dept", Arg::Null);

        assert_eq!(
            args.required::<String>("dept"),
            Err(ConstructError::MissingArgument { name: "dept" })
        );
        assert_eq!(
            args.required::<String>("team"),
            Err(ConstructError::MissingArgument { name: "team" })
        );
    }

    #[test]
    fn required_rejects_wrong_type() {
        let value = 7u32;
        let mut args = ArgumentSet::new();
        args.insert("age", Arg::Value(&value));

        assert!(matches!(
            args.required::<String>("age"),
            Err(ConstructError::TypeMismatch { name: "age", .. })
        ));
    }

    #[test]
    fn optional_maps_null_and_missing_to_none() {
        let value = 7u32;
        let mut args = ArgumentSet::new();
        args.insert("age", Arg::Value(&value));
        args.insert("nick", Arg::Null);

        assert_eq!(args.optional::<u32>("age").unwrap(), Some(7));
        assert_eq!(args.optional::<u32>("nick").unwrap(), None);
        assert_eq!(args.optional::<u32>("unset").unwrap(), None);
    }
}
