use crate::value::Value;
use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

///
/// Predicate tree
///
/// Storage-agnostic boolean combination of leaf conditions. This layer
/// carries no schema knowledge; the compiler validates before building it
/// and storage adapters translate it.
///

///
/// LeafOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum LeafOp {
    Eq = 0x01,
    In = 0x02,
    Gte = 0x03,
    Lte = 0x04,
    Contains = 0x05,
    IsNull = 0x06,
    IsNotNull = 0x07,
}

impl LeafOp {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for LeafOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Eq => "=",
            Self::In => "IN",
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Contains => "CONTAINS",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        };
        f.write_str(label)
    }
}

///
/// LeafPredicate
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct LeafPredicate {
    pub field: String,
    pub op: LeafOp,
    pub values: Vec<Value>,
}

impl LeafPredicate {
    #[must_use]
    pub fn new(field: impl Into<String>, op: LeafOp, values: Vec<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            values,
        }
    }

    /// The single operand of a one-value leaf.
    #[must_use]
    pub fn operand(&self) -> Option<&Value> {
        self.values.first()
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Predicate {
    True,
    False,
    And(Vec<Self>),
    Or(Vec<Self>),
    Leaf(LeafPredicate),
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[must_use]
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::Leaf(LeafPredicate::new(field, LeafOp::Eq, vec![value]))
    }

    #[must_use]
    pub fn in_(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::Leaf(LeafPredicate::new(field, LeafOp::In, values))
    }

    #[must_use]
    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self::Leaf(LeafPredicate::new(field, LeafOp::Gte, vec![value]))
    }

    #[must_use]
    pub fn lte(field: impl Into<String>, value: Value) -> Self {
        Self::Leaf(LeafPredicate::new(field, LeafOp::Lte, vec![value]))
    }

    #[must_use]
    pub fn contains(field: impl Into<String>, value: Value) -> Self {
        Self::Leaf(LeafPredicate::new(field, LeafOp::Contains, vec![value]))
    }

    #[must_use]
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::Leaf(LeafPredicate::new(field, LeafOp::IsNull, Vec::new()))
    }

    #[must_use]
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::Leaf(LeafPredicate::new(field, LeafOp::IsNotNull, Vec::new()))
    }

    #[must_use]
    pub const fn is_false(&self) -> bool {
        matches!(self, Self::False)
    }

    /// Number of leaves in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::True | Self::False => 0,
            Self::And(children) | Self::Or(children) => children.iter().map(Self::leaf_count).sum(),
            Self::Leaf(_) => 1,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("TRUE"),
            Self::False => f.write_str("FALSE"),
            Self::And(children) => write_group(f, children, "AND"),
            Self::Or(children) => write_group(f, children, "OR"),
            Self::Leaf(leaf) => match leaf.op {
                LeafOp::IsNull | LeafOp::IsNotNull => write!(f, "{} {}", leaf.field, leaf.op),
                LeafOp::In => write!(f, "{} IN {:?}", leaf.field, leaf.values),
                _ => match leaf.operand() {
                    Some(value) => write!(f, "{} {} {value:?}", leaf.field, leaf.op),
                    None => write!(f, "{} {} ?", leaf.field, leaf.op),
                },
            },
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, children: &[Predicate], sep: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, " {sep} ")?;
        }
        write!(f, "{child}")?;
    }
    f.write_str(")")
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}
