use umapper::{FieldFlags, Mappable};
use umapper_testhelpers::test;

#[test]
fn unit_struct() {
    #[derive(Mappable)]
    struct UnitStruct;

    let shape = UnitStruct::SHAPE;
    assert_eq!(format!("{}", shape), "UnitStruct");
    assert_eq!(shape.fields.len(), 0);
    assert_eq!(shape.params.len(), 0);
    assert!(shape.ancestor.is_none());
    assert!(!shape.has_default());
}

#[test]
fn simple_struct() {
    #[derive(Mappable)]
    struct Blah {
        foo: u32,
        bar: String,
    }

    let shape = Blah::SHAPE;
    assert_eq!(format!("{}", shape), "Blah");
    assert_eq!(shape.fields.len(), 2);

    let foo_field = &shape.fields[0];
    assert_eq!(foo_field.name, "foo");
    assert_eq!(foo_field.flags, FieldFlags::EMPTY);

    let bar_field = &shape.fields[1];
    assert_eq!(bar_field.name, "bar");

    let names: Vec<&str> = shape.params.iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["foo", "bar"]);
    assert!(shape.params.iter().all(|p| !p.is_nullable()));

    // silence never-constructed warnings; shapes only need the type
    let _ = Blah {
        foo: 1,
        bar: String::new(),
    };
}

#[test]
fn nullable_and_sequence_flags() {
    #[derive(Mappable)]
    struct Mixed {
        plain: u8,
        nick: Option<String>,
        scores: Vec<u32>,
        history: Option<Vec<u32>>,
    }

    let shape = Mixed::SHAPE;
    assert_eq!(shape.field("plain").unwrap().flags, FieldFlags::EMPTY);
    assert_eq!(shape.field("nick").unwrap().flags, FieldFlags::NULLABLE);
    assert_eq!(shape.field("scores").unwrap().flags, FieldFlags::SEQUENCE);
    assert_eq!(
        shape.field("history").unwrap().flags,
        FieldFlags::NULLABLE | FieldFlags::SEQUENCE
    );

    let nick = shape.params.iter().find(|p| p.name == "nick").unwrap();
    assert!(nick.is_nullable());

    let _ = Mixed {
        plain: 0,
        nick: None,
        scores: vec![],
        history: None,
    };
}

#[test]
fn struct_doc_comment() {
    /// yes
    #[derive(Mappable)]
    struct Foo {}

    assert_eq!(Foo::SHAPE.doc, &[" yes"]);
}

#[test]
fn field_doc_comment() {
    #[derive(Mappable)]
    struct Documented {
        /// how many
        count: u64,
    }

    assert_eq!(Documented::SHAPE.field("count").unwrap().doc, &[" how many"]);
    let _ = Documented { count: 0 };
}

#[test]
fn raw_identifier_field() {
    #[derive(Mappable)]
    struct Keywordy {
        r#type: String,
    }

    assert_eq!(Keywordy::SHAPE.fields[0].name, "type");
    let _ = Keywordy {
        r#type: String::new(),
    };
}

#[test]
fn default_attribute_registers_a_default_constructor() {
    #[derive(Mappable, Default)]
    #[umapper(default)]
    struct Settings {
        verbose: Option<bool>,
    }

    assert!(Settings::SHAPE.has_default());
    let _ = Settings { verbose: None };
}

#[test]
fn extends_links_the_ancestor_shape() {
    #[derive(Mappable, Clone)]
    struct Entity {
        id: u64,
    }

    #[derive(Mappable)]
    struct Customer {
        name: String,
        #[umapper(extends)]
        entity: Entity,
    }

    let shape = Customer::SHAPE;
    // the embedded field is not itself mappable
    assert_eq!(shape.fields.len(), 1);
    assert_eq!(shape.fields[0].name, "name");
    assert_eq!(shape.params.len(), 1);
    assert_eq!(shape.ancestor_shape().unwrap(), Entity::SHAPE);

    let _ = Customer {
        name: String::new(),
        entity: Entity { id: 0 },
    };
}
