
use super::*;
use crate::{
    db::{
        filter::{Criterion, FilterSet, RangeBounds, SortDirection, SortKey, SortSpec},
        scope::{Principal, Role, ScopeContext, ScopeGuard},
    },
    error::ErrorKind,
    test_fixtures::{POSTING, PostingRow, active, owner},
    value::Value,
};

fn owner_scope() -> crate::db::scope::ScopeConstraint {
    let ctx = ScopeContext::authenticated(Principal::new(owner(1), Role::Employer));
    ScopeGuard::owner("ownerId", Role::Employer)
        .constraint(&ctx, POSTING.path)
        .expect("employer scope")
}

fn compile(filter: &FilterSet) -> CompiledQuery {
    PredicateCompiler::new(&POSTING)
        .compile(filter, owner_scope())
        .expect("filter should compile")
}

fn compile_err(filter: &FilterSet) -> ErrorKind {
    PredicateCompiler::new(&POSTING)
        .compile(filter, owner_scope())
        .expect_err("filter should be rejected")
        .kind()
}

//
// Structure
//

#[test]
fn empty_filter_compiles_to_scope_and_true() {
    let query = compile(&FilterSet::new());

    assert_eq!(query.filter(), &Predicate::True);
    assert_eq!(
        query.predicate(),
        &Predicate::And(vec![
            Predicate::eq("ownerId", Value::Ulid(owner(1))),
            Predicate::True,
        ])
    );
}

#[test]
fn criteria_are_and_ed_in_key_order() {
    let filter = FilterSet::new()
        .with_criterion("status", Criterion::eq("status", active()))
        .with_criterion("keyword", Criterion::contains("title", "rust"));

    assert_eq!(
        compile(&filter).filter(),
        &Predicate::And(vec![
            Predicate::contains("title", Value::from("rust")),
            Predicate::eq("status", active()),
        ])
    );
}

#[test]
fn open_range_compiles_to_single_bound() {
    let filter = FilterSet::new().with_criterion(
        "salaryRange",
        Criterion::range("salary", 50_000u64, Value::Null, RangeBounds::Open).unwrap(),
    );

    assert_eq!(
        compile(&filter).filter(),
        &Predicate::And(vec![Predicate::And(vec![Predicate::gte(
            "salary",
            Value::Uint(50_000)
        )])])
    );
}

#[test]
fn closed_range_compiles_to_both_bounds() {
    let filter = FilterSet::new().with_criterion(
        "salaryRange",
        Criterion::range("salary", 10u64, 20u64, RangeBounds::Closed).unwrap(),
    );

    assert_eq!(
        compile(&filter).filter(),
        &Predicate::And(vec![Predicate::And(vec![
            Predicate::gte("salary", Value::Uint(10)),
            Predicate::lte("salary", Value::Uint(20)),
        ])])
    );
}

#[test]
fn multi_value_contains_ors_within_the_criterion() {
    let filter = FilterSet::new().with_criterion(
        "skills",
        Criterion::contains_any("tags", vec!["rust", "go", "rust"]),
    );

    assert_eq!(
        compile(&filter).filter(),
        &Predicate::And(vec![Predicate::Or(vec![
            Predicate::contains("tags", Value::from("go")),
            Predicate::contains("tags", Value::from("rust")),
        ])])
    );
}

#[test]
fn in_values_are_canonicalised() {
    let filter = FilterSet::new().with_criterion(
        "statuses",
        Criterion::in_(
            "status",
            vec![
                Value::Enum("PAUSED".into()),
                active(),
                Value::Enum("PAUSED".into()),
            ],
        ),
    );

    assert_eq!(
        compile(&filter).filter(),
        &Predicate::And(vec![Predicate::in_(
            "status",
            vec![active(), Value::Enum("PAUSED".into())]
        )])
    );
}

#[test]
fn exists_compiles_to_null_checks() {
    let filter = FilterSet::new()
        .with_criterion("hasNotes", Criterion::exists("notes", false))
        .with_criterion("hasSalary", Criterion::exists("salary", true));

    assert_eq!(
        compile(&filter).filter(),
        &Predicate::And(vec![
            Predicate::is_null("notes"),
            Predicate::is_not_null("salary"),
        ])
    );
}

#[test]
fn empty_in_short_circuits_but_scope_remains() {
    let filter = FilterSet::new()
        .with_criterion("keyword", Criterion::contains("title", "rust"))
        .with_criterion("statuses", Criterion::in_("status", Vec::<Value>::new()));
    let query = compile(&filter);

    assert!(query.filter().is_false());
    assert_eq!(
        query.predicate(),
        &Predicate::And(vec![
            Predicate::eq("ownerId", Value::Ulid(owner(1))),
            Predicate::False,
        ])
    );
}

//
// Sort
//

#[test]
fn tie_break_is_appended_once() {
    let filter = FilterSet::new().with_sort(SortSpec::new().desc("createdAt"));
    let sort = compile(&filter).sort().clone();

    assert_eq!(
        sort.keys(),
        &[
            SortKey::new("createdAt", SortDirection::Desc),
            SortKey::new("id", SortDirection::Asc),
        ]
    );
    assert_eq!(sort.tie_break(), Some(&SortKey::new("id", SortDirection::Asc)));
}

#[test]
fn caller_primary_key_sort_is_the_tie_break() {
    let filter = FilterSet::new().with_sort(SortSpec::new().asc("title").desc("id").asc("salary"));

    assert_eq!(
        compile(&filter).sort().keys(),
        &[
            SortKey::new("title", SortDirection::Asc),
            SortKey::new("id", SortDirection::Desc),
        ]
    );
}

#[test]
fn unknown_or_unsortable_sort_fields_fail() {
    let unknown = FilterSet::new().with_sort(SortSpec::new().asc("popularity"));
    let unsortable = FilterSet::new().with_sort(SortSpec::new().asc("status"));

    assert_eq!(compile_err(&unknown), ErrorKind::UnknownSortField);
    assert_eq!(compile_err(&unsortable), ErrorKind::UnknownSortField);
}

//
// Validation
//

#[test]
fn unknown_filter_field_fails() {
    let filter = FilterSet::new().with_criterion("x", Criterion::eq("color", "red"));

    assert_eq!(compile_err(&filter), ErrorKind::UnknownField);
}

#[test]
fn operator_must_suit_the_field_kind() {
    let range_on_enum = FilterSet::new().with_criterion(
        "status",
        Criterion::range("status", active(), active(), RangeBounds::Open).unwrap(),
    );
    let contains_on_uint = FilterSet::new().with_criterion("s", Criterion::contains("salary", 5u64));
    let eq_on_list = FilterSet::new().with_criterion("t", Criterion::eq("tags", "rust"));

    assert_eq!(compile_err(&range_on_enum), ErrorKind::InvalidOperator);
    assert_eq!(compile_err(&contains_on_uint), ErrorKind::InvalidOperator);
    assert_eq!(compile_err(&eq_on_list), ErrorKind::InvalidOperator);
}

#[test]
fn literals_must_match_the_field_kind() {
    let text_for_uint = FilterSet::new().with_criterion("s", Criterion::gte("salary", "lots"));
    let number_in_tags =
        FilterSet::new().with_criterion("t", Criterion::contains_any("tags", vec![5u64]));

    assert_eq!(compile_err(&text_for_uint), ErrorKind::InvalidLiteral);
    assert_eq!(compile_err(&number_in_tags), ErrorKind::InvalidLiteral);
}

#[test]
fn validation_wins_over_empty_in_short_circuit() {
    let filter = FilterSet::new()
        .with_criterion("a", Criterion::in_("status", Vec::<Value>::new()))
        .with_criterion("b", Criterion::eq("color", "red"));

    assert_eq!(compile_err(&filter), ErrorKind::UnknownField);
}

//
// Fingerprint
//

#[test]
fn fingerprint_ignores_page_window_but_tracks_sort() {
    let base = FilterSet::new().with_criterion("status", Criterion::eq("status", active()));
    let paged = base.with_page(crate::db::filter::PageWindow::new(40, 5));
    let sorted = base.with_sort(SortSpec::new().desc("salary"));

    assert_eq!(compile(&base).fingerprint(), compile(&paged).fingerprint());
    assert_ne!(compile(&base).fingerprint(), compile(&sorted).fingerprint());
    assert_eq!(compile(&base).fingerprint().as_hex().len(), 64);
}

#[test]
fn fingerprint_separates_signed_and_unsigned_literals() {
    let unsigned = FilterSet::new().with_criterion("s", Criterion::eq("salary", 5u64));
    let signed = FilterSet::new().with_criterion("s", Criterion::eq("salary", 5i64));

    assert_ne!(compile(&unsigned).fingerprint(), compile(&signed).fingerprint());
}

//
// Eval
//

#[test]
fn eval_contains_is_case_insensitive_for_text_and_lists() {
    let row = PostingRow::new(1, owner(1), "ACTIVE")
        .title("Senior Rust Engineer")
        .tags(&["Rust", "SQL"]);

    assert!(eval(&row, &Predicate::contains("title", Value::from("rust eng"))));
    assert!(eval(&row, &Predicate::contains("tags", Value::from("sql"))));
    assert!(!eval(&row, &Predicate::contains("tags", Value::from("go"))));
}

#[test]
fn eval_null_only_satisfies_is_null() {
    let row = PostingRow::new(1, owner(1), "ACTIVE");

    assert!(eval(&row, &Predicate::is_null("salary")));
    assert!(eval(&row, &Predicate::is_null("missingField")));
    assert!(!eval(&row, &Predicate::gte("salary", Value::Uint(0))));
    assert!(!eval(&row, &Predicate::in_("salary", vec![Value::Null])));

    let noted = row.notes("relocation offered");
    assert!(eval(&noted, &Predicate::is_not_null("notes")));
}

#[test]
fn eval_compares_across_numeric_signedness() {
    let row = PostingRow::new(1, owner(1), "ACTIVE").salary(50_000).remote();

    assert!(eval(&row, &Predicate::gte("salary", Value::Int(50_000))));
    assert!(eval(&row, &Predicate::eq("remote", Value::Bool(true))));
    assert!(!eval(&row, &Predicate::eq("status", Value::from("ACTIVE"))));
    assert!(eval(&row, &Predicate::eq("status", active())));
}
