use alloc::collections::BTreeMap;

use umapper_core::{FieldValue, Shape};

use crate::discover::discover_fields;
use crate::peek::Peek;
use crate::MapperError;

/// Field name to source value, for every name present on both sides.
///
/// Names unmatched on either side are simply absent from the map; a present
/// entry may still be [`FieldValue::Absent`] when the source field is an
/// `Option` holding `None`.
pub type ValueMap = BTreeMap<&'static str, FieldValue>;

/// Builds the value map for one mapping call.
///
/// Iterates the *target's* discovered fields in discovery order
/// (most-derived first); for each name that also exists among the source's
/// discovered fields, reads the source field's current value. The first
/// occurrence of a name wins on both sides, so a field redeclared on a
/// derived level shadows its ancestor.
pub fn match_fields(source: Peek<'_>, target: &'static Shape) -> Result<ValueMap, MapperError> {
    let source_fields = discover_fields(source.shape());
    let target_fields = discover_fields(target);

    let mut values = ValueMap::new();
    for entry in &target_fields {
        let name = entry.field.name;
        if values.contains_key(name) {
            continue;
        }
        let Some(found) = source_fields.iter().find(|s| s.field.name == name) else {
            continue;
        };
        let value = source.at_depth(found.depth)?.read(found.field)?;
        values.insert(name, value);
    }

    #[cfg(feature = "log")]
    log::trace!(
        "matched {} of {} target field(s) from {} to {}",
        values.len(),
        target_fields.len(),
        source.shape(),
        target
    );

    Ok(values)
}
