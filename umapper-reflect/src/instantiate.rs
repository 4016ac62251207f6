use umapper_core::{Arg, ArgumentSet, BoxedValue, FieldValue, Shape};

use crate::discover::discover_params;
use crate::matcher::ValueMap;
use crate::{InternalCause, MapperError};

/// Builds an instance of the target shape from a value map.
///
/// When the map is empty (no field names matched at all) the target's
/// registered zero-argument constructor is used instead; a target without
/// one fails with [`MapperError::NoDefaultConstructor`]. This check comes
/// before parameter resolution so that two shapes with no common names
/// default-construct rather than tripping over the first required
/// parameter.
///
/// Otherwise every constructor parameter along the target's chain is
/// resolved by name: a held value is passed through, an absent or missing
/// value becomes null for nullable parameters and fails with
/// [`MapperError::MissingRequiredField`] for non-nullable ones. A matched
/// but absent value is treated exactly like a missing one: the contract of
/// a non-nullable parameter is not satisfied by "the source had the field
/// but it was empty".
pub fn instantiate(target: &'static Shape, values: &ValueMap) -> Result<BoxedValue, MapperError> {
    if values.is_empty() {
        return match target.vtable.default_fn {
            Some(default_fn) => Ok(default_fn()),
            None => Err(MapperError::NoDefaultConstructor { shape: target }),
        };
    }

    let mut args = ArgumentSet::new();
    for entry in discover_params(target) {
        let param = entry.param;
        if args.contains(param.name) {
            // first occurrence wins; a shadowing level already resolved it
            continue;
        }
        match values.get(param.name) {
            Some(FieldValue::Present(value)) => {
                args.insert(param.name, Arg::Value(value.as_ref()));
            }
            Some(FieldValue::Absent) | None => {
                if param.is_nullable() {
                    args.insert(param.name, Arg::Null);
                } else {
                    return Err(MapperError::MissingRequiredField {
                        shape: target,
                        param: param.name,
                    });
                }
            }
        }
    }

    #[cfg(feature = "log")]
    log::trace!("constructing {} from {} argument(s)", target, args.len());

    (target.vtable.construct)(&args).map_err(|cause| MapperError::Internal {
        shape: target,
        cause: InternalCause::Construct(cause),
    })
}
