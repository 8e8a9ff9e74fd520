use crate::{
    model::field::FieldKind,
    test_fixtures::POSTING,
    value::{Timestamp, Value},
};

#[test]
fn field_lookup_uses_filter_names() {
    let field = POSTING.field("createdAt").expect("createdAt exists");
    assert_eq!(field.column, "created_at");
    assert!(POSTING.field("created_at").is_none());
}

#[test]
fn sortable_field_admits_primary_key_and_declared_fields() {
    assert!(POSTING.sortable_field("id").is_some());
    assert!(POSTING.sortable_field("salary").is_some());
    assert!(POSTING.sortable_field("status").is_none());
    assert!(POSTING.sortable_field("missing").is_none());
}

#[test]
fn primary_key_identity() {
    assert!(POSTING.is_primary_key("id"));
    assert!(!POSTING.is_primary_key("ownerId"));
}

#[test]
fn kind_capabilities() {
    let tags = FieldKind::List(&FieldKind::Text);

    assert!(FieldKind::Timestamp.is_orderable());
    assert!(!FieldKind::Enum.is_orderable());
    assert!(!FieldKind::Bool.is_orderable());
    assert!(tags.is_list());
    assert_eq!(*tags.element(), FieldKind::Text);
    assert_eq!(*FieldKind::Uint.element(), FieldKind::Uint);
    assert_eq!(tags.to_string(), "list<text>");
}

#[test]
fn kind_accepts_matching_literals() {
    assert!(FieldKind::Uint.accepts(&Value::Int(5)));
    assert!(FieldKind::Int.accepts(&Value::Uint(5)));
    assert!(FieldKind::Enum.accepts(&Value::Enum("ACTIVE".into())));
    assert!(!FieldKind::Enum.accepts(&Value::Text("ACTIVE".into())));
    assert!(FieldKind::Timestamp.accepts(&Value::Timestamp(Timestamp::EPOCH)));
    assert!(!FieldKind::Text.accepts(&Value::Null));
    assert!(!FieldKind::List(&FieldKind::Text).accepts(&Value::Text("rust".into())));
}
