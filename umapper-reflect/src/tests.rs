//! Engine tests against hand-built shapes, so discovery, matching and
//! instantiation are exercised without going through the derive macro.

use core::any::Any;

use umapper_core::{
    ArgumentSet, BoxedValue, ConstructError, CtorParam, Field, FieldFlags, FieldValue, Mappable,
    Shape, ShapeVTable, boxed,
};
use umapper_testhelpers::test;

use crate::{
    InternalCause, MapperError, Peek, ValueMap, discover_fields, discover_params, instantiate,
    map, match_fields,
};

#[derive(Clone, Debug, PartialEq)]
struct Entity {
    id: u64,
    tag: Option<String>,
}

impl Mappable for Entity {
    const SHAPE: &'static Shape = &const {
        fn get_id(instance: &dyn Any) -> Option<FieldValue> {
            let value = instance.downcast_ref::<Entity>()?;
            Some(FieldValue::present(value.id))
        }
        fn get_tag(instance: &dyn Any) -> Option<FieldValue> {
            let value = instance.downcast_ref::<Entity>()?;
            Some(match &value.tag {
                Some(inner) => FieldValue::present(inner.clone()),
                None => FieldValue::Absent,
            })
        }
        fn construct(args: &ArgumentSet<'_>) -> Result<BoxedValue, ConstructError> {
            Ok(boxed(Entity {
                id: args.required::<u64>("id")?,
                tag: args.optional::<String>("tag")?,
            }))
        }
        Shape::builder()
            .type_name("Entity")
            .fields(&const {
                [
                    Field::builder().name("id").get(get_id).build(),
                    Field::builder()
                        .name("tag")
                        .flags(FieldFlags::NULLABLE)
                        .get(get_tag)
                        .build(),
                ]
            })
            .params(&const {
                [
                    CtorParam::builder().name("id").build(),
                    CtorParam::builder()
                        .name("tag")
                        .flags(FieldFlags::NULLABLE)
                        .build(),
                ]
            })
            .vtable(&const { ShapeVTable::builder().construct(construct).build() })
            .build()
    };
}

/// Extends Entity; its own `tag` shadows the ancestor's nullable one with a
/// required field.
#[derive(Clone, Debug, PartialEq)]
struct Tagged {
    tag: String,
    entity: Entity,
}

impl Mappable for Tagged {
    const SHAPE: &'static Shape = &const {
        fn get_tag(instance: &dyn Any) -> Option<FieldValue> {
            let value = instance.downcast_ref::<Tagged>()?;
            Some(FieldValue::present(value.tag.clone()))
        }
        fn ancestor_shape() -> &'static Shape {
            <Entity as Mappable>::SHAPE
        }
        fn project_ancestor(instance: &dyn Any) -> Option<&dyn Any> {
            let value = instance.downcast_ref::<Tagged>()?;
            Some(&value.entity as &dyn Any)
        }
        fn construct(args: &ArgumentSet<'_>) -> Result<BoxedValue, ConstructError> {
            Ok(boxed(Tagged {
                tag: args.required::<String>("tag")?,
                entity: args.construct::<Entity>()?,
            }))
        }
        Shape::builder()
            .type_name("Tagged")
            .fields(&const { [Field::builder().name("tag").get(get_tag).build()] })
            .params(&const { [CtorParam::builder().name("tag").build()] })
            .ancestor(
                umapper_core::AncestorLink::builder()
                    .shape(ancestor_shape)
                    .project(project_ancestor)
                    .build(),
            )
            .vtable(&const { ShapeVTable::builder().construct(construct).build() })
            .build()
    };
}

#[derive(Clone, Debug, PartialEq, Default)]
struct Settings {
    verbose: Option<bool>,
}

impl Mappable for Settings {
    const SHAPE: &'static Shape = &const {
        fn get_verbose(instance: &dyn Any) -> Option<FieldValue> {
            let value = instance.downcast_ref::<Settings>()?;
            Some(match &value.verbose {
                Some(inner) => FieldValue::present(*inner),
                None => FieldValue::Absent,
            })
        }
        fn construct(args: &ArgumentSet<'_>) -> Result<BoxedValue, ConstructError> {
            Ok(boxed(Settings {
                verbose: args.optional::<bool>("verbose")?,
            }))
        }
        fn default_instance() -> BoxedValue {
            boxed(Settings::default())
        }
        Shape::builder()
            .type_name("Settings")
            .fields(&const {
                [Field::builder()
                    .name("verbose")
                    .flags(FieldFlags::NULLABLE)
                    .get(get_verbose)
                    .build()]
            })
            .params(&const {
                [CtorParam::builder()
                    .name("verbose")
                    .flags(FieldFlags::NULLABLE)
                    .build()]
            })
            .vtable(&const {
                ShapeVTable::builder()
                    .construct(construct)
                    .default_fn(default_instance)
                    .build()
            })
            .build()
    };
}

#[test]
fn discovery_walks_the_chain_derived_first() {
    let fields = discover_fields(Tagged::SHAPE);
    let names: Vec<(&str, usize)> = fields.iter().map(|f| (f.field.name, f.depth)).collect();
    assert_eq!(names, vec![("tag", 0), ("id", 1), ("tag", 1)]);

    let params = discover_params(Tagged::SHAPE);
    let names: Vec<(&str, usize)> = params.iter().map(|p| (p.param.name, p.depth)).collect();
    assert_eq!(names, vec![("tag", 0), ("id", 1), ("tag", 1)]);
}

#[test]
fn discovery_of_a_leaf_shape_has_no_ancestor_levels() {
    let fields = discover_fields(Entity::SHAPE);
    assert_eq!(fields.len(), 2);
    assert!(fields.iter().all(|f| f.depth == 0));
}

#[test]
fn matching_reads_current_values_by_name() {
    let entity = Entity {
        id: 7,
        tag: Some("vip".into()),
    };
    let values = match_fields(Peek::new(&entity), Entity::SHAPE)?;

    assert_eq!(values.len(), 2);
    let id = values["id"].as_any().unwrap().downcast_ref::<u64>().unwrap();
    assert_eq!(*id, 7);
    let tag = values["tag"]
        .as_any()
        .unwrap()
        .downcast_ref::<String>()
        .unwrap();
    assert_eq!(tag, "vip");
}

#[test]
fn matching_records_absent_options_explicitly() {
    let entity = Entity { id: 7, tag: None };
    let values = match_fields(Peek::new(&entity), Entity::SHAPE)?;

    assert!(values["tag"].is_absent());
}

#[test]
fn matching_reads_ancestor_fields_through_projection() {
    let tagged = Tagged {
        tag: "vip".into(),
        entity: Entity {
            id: 41,
            tag: Some("shadowed".into()),
        },
    };
    let values = match_fields(Peek::new(&tagged), Entity::SHAPE)?;

    // "tag" resolves on the derived level, "id" one level down
    let id = values["id"].as_any().unwrap().downcast_ref::<u64>().unwrap();
    assert_eq!(*id, 41);
    let tag = values["tag"]
        .as_any()
        .unwrap()
        .downcast_ref::<String>()
        .unwrap();
    assert_eq!(tag, "vip");
}

#[test]
fn instantiation_fills_unmatched_nullable_params_with_none() {
    let mut values = ValueMap::new();
    values.insert("id", FieldValue::present(9u64));

    let built = instantiate(Entity::SHAPE, &values)?;
    let entity = built.downcast_ref::<Entity>().unwrap();
    assert_eq!(*entity, Entity { id: 9, tag: None });
}

#[test]
fn instantiation_rejects_unmatched_required_params() {
    let mut values = ValueMap::new();
    values.insert("tag", FieldValue::present(String::from("vip")));

    let err = instantiate(Entity::SHAPE, &values).err().unwrap();
    assert_eq!(
        err,
        MapperError::MissingRequiredField {
            shape: Entity::SHAPE,
            param: "id",
        }
    );
}

#[test]
fn instantiation_rejects_absent_values_for_required_params() {
    // matched but empty is not good enough for a required parameter
    let mut values = ValueMap::new();
    values.insert("tag", FieldValue::Absent);
    values.insert("id", FieldValue::present(1u64));

    let err = instantiate(Tagged::SHAPE, &values).err().unwrap();
    assert_eq!(
        err,
        MapperError::MissingRequiredField {
            shape: Tagged::SHAPE,
            param: "tag",
        }
    );
}

#[test]
fn instantiation_falls_back_to_default_on_empty_map() {
    let values = ValueMap::new();
    let built = instantiate(Settings::SHAPE, &values)?;
    let settings = built.downcast_ref::<Settings>().unwrap();
    assert_eq!(*settings, Settings::default());
}

#[test]
fn instantiation_without_default_fails_on_empty_map() {
    let values = ValueMap::new();
    let err = instantiate(Entity::SHAPE, &values).err().unwrap();
    assert_eq!(err, MapperError::NoDefaultConstructor { shape: Entity::SHAPE });
}

#[test]
fn shadowing_is_resolved_by_the_most_derived_level() {
    // The source's derived level has no value for the required `tag`;
    // the ancestor's Some("old") must not resurrect it.
    let entity = Entity { id: 3, tag: None };
    let values = match_fields(Peek::new(&entity), Tagged::SHAPE)?;

    assert!(values["tag"].is_absent());
    let err = instantiate(Tagged::SHAPE, &values).err().unwrap();
    assert_eq!(
        err,
        MapperError::MissingRequiredField {
            shape: Tagged::SHAPE,
            param: "tag",
        }
    );
}

#[test]
fn map_builds_ancestors_recursively() {
    let entity = Entity {
        id: 12,
        tag: Some("vip".into()),
    };
    let tagged: Tagged = map(&entity)?;

    assert_eq!(
        tagged,
        Tagged {
            tag: "vip".into(),
            entity: Entity {
                id: 12,
                tag: Some("vip".into()),
            },
        }
    );
}

#[test]
fn map_flattens_ancestors_back_out() {
    let tagged = Tagged {
        tag: "vip".into(),
        entity: Entity {
            id: 12,
            tag: Some("inner".into()),
        },
    };
    let entity: Entity = map(&tagged)?;

    // derived `tag` shadows the ancestor's value
    assert_eq!(
        entity,
        Entity {
            id: 12,
            tag: Some("vip".into()),
        }
    );
}

#[test]
fn construct_errors_surface_as_internal() {
    // hand-built maps can smuggle in mismatched types; the engine reports
    // the constructor's rejection rather than swallowing it
    let mut values = ValueMap::new();
    values.insert("id", FieldValue::present("not a number"));

    let err = instantiate(Entity::SHAPE, &values).err().unwrap();
    assert!(matches!(
        err,
        MapperError::Internal {
            cause: InternalCause::Construct(ConstructError::TypeMismatch { name: "id", .. }),
            ..
        }
    ));
}
