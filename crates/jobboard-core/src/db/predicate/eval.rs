use crate::{
    db::predicate::{LeafOp, LeafPredicate, Predicate},
    traits::FieldValues,
    value::Value,
};
use std::cmp::Ordering;

///
/// FieldPresence
///
/// Result of looking a field up on a row. Distinguishes a field the row
/// does not carry from one that is present but holds `Value::Null`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldPresence {
    Present(Value),
    Missing,
}

///
/// Row
///
/// Row-like value exposing fields by name, decoupling evaluation from
/// concrete record types.
///

pub trait Row {
    fn field(&self, name: &str) -> FieldPresence;
}

impl<T: FieldValues> Row for T {
    fn field(&self, name: &str) -> FieldPresence {
        match self.get_value(name) {
            Some(value) => FieldPresence::Present(value),
            None => FieldPresence::Missing,
        }
    }
}

///
/// Evaluate a predicate tree against one row.
///
/// Comparisons are strict: a leaf whose operand and row value come from
/// different families is false, never an error. Null only satisfies
/// `IsNull`.
///
#[must_use]
pub fn eval<R: Row + ?Sized>(row: &R, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::False => false,
        Predicate::And(children) => children.iter().all(|child| eval(row, child)),
        Predicate::Or(children) => children.iter().any(|child| eval(row, child)),
        Predicate::Leaf(leaf) => eval_leaf(row, leaf),
    }
}

fn eval_leaf<R: Row + ?Sized>(row: &R, leaf: &LeafPredicate) -> bool {
    let actual = match row.field(&leaf.field) {
        FieldPresence::Present(Value::Null) | FieldPresence::Missing => None,
        FieldPresence::Present(value) => Some(value),
    };

    match leaf.op {
        LeafOp::IsNull => actual.is_none(),
        LeafOp::IsNotNull => actual.is_some(),
        LeafOp::In => actual.is_some_and(|actual| leaf.values.iter().any(|v| actual.eq_strict(v))),
        op => {
            let (Some(actual), Some(operand)) = (actual, leaf.operand()) else {
                return false;
            };
            eval_compare(op, &actual, operand)
        }
    }
}

fn eval_compare(op: LeafOp, actual: &Value, operand: &Value) -> bool {
    match op {
        LeafOp::Eq => actual.eq_strict(operand),
        LeafOp::Gte => matches!(
            actual.cmp_strict(operand),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        LeafOp::Lte => matches!(
            actual.cmp_strict(operand),
            Some(Ordering::Less | Ordering::Equal)
        ),
        LeafOp::Contains => match actual {
            Value::List(_) => actual.list_contains(operand),
            _ => actual.text_contains_ci(operand).unwrap_or(false),
        },
        LeafOp::In | LeafOp::IsNull | LeafOp::IsNotNull => false,
    }
}
