//! PostgreSQL rendering of compiled trees.
//!
//! Every literal becomes a bound parameter (`$1`, `$2`, ...); identifiers
//! come only from static field models and are always double-quoted, so no
//! caller-controlled text ever reaches the statement body.

use crate::{
    db::{
        executor::StorageError,
        filter::SortDirection,
        predicate::{LeafOp, LeafPredicate, Predicate, SortDirective},
    },
    model::{entity::EntityModel, field::FieldModel},
    value::Value,
};
use std::fmt::Write as _;

///
/// SqlStatement
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SqlStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

///
/// SqlQuery
/// Window query plus the matching count over the same predicate.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SqlQuery {
    pub select: SqlStatement,
    pub count: SqlStatement,
}

/// Render the select and count statements for one storage fetch.
pub fn render(
    model: &'static EntityModel,
    predicate: &Predicate,
    sort: &SortDirective,
    offset: u64,
    limit: u32,
) -> Result<SqlQuery, StorageError> {
    let mut writer = SqlWriter::new(model);
    writer.predicate(predicate)?;
    let where_clause = std::mem::take(&mut writer.sql);
    let where_params = writer.params.clone();

    let table = quote(model.table);
    let count = SqlStatement {
        sql: format!("SELECT COUNT(*) FROM {table} WHERE {where_clause}"),
        params: where_params,
    };

    let mut order = Vec::with_capacity(sort.keys().len());
    for key in sort.keys() {
        let column = quote(writer.field(&key.field)?.column);
        order.push(match key.direction {
            SortDirection::Asc => format!("{column} ASC NULLS FIRST"),
            SortDirection::Desc => format!("{column} DESC NULLS LAST"),
        });
    }

    let limit_param = writer.bind(Value::Uint(u64::from(limit)));
    let offset_param = writer.bind(Value::Uint(offset));
    let mut sql = format!("SELECT * FROM {table} WHERE {where_clause}");
    if !order.is_empty() {
        let _ = write!(sql, " ORDER BY {}", order.join(", "));
    }
    let _ = write!(sql, " LIMIT {limit_param} OFFSET {offset_param}");

    Ok(SqlQuery {
        select: SqlStatement {
            sql,
            params: writer.params,
        },
        count,
    })
}

///
/// SqlWriter
///

struct SqlWriter {
    model: &'static EntityModel,
    sql: String,
    params: Vec<Value>,
}

impl SqlWriter {
    const fn new(model: &'static EntityModel) -> Self {
        Self {
            model,
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn field(&self, name: &str) -> Result<&'static FieldModel, StorageError> {
        self.model.field(name).ok_or_else(|| {
            StorageError::internal(format!("{} has no column for field '{name}'", self.model.path))
        })
    }

    fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    fn predicate(&mut self, predicate: &Predicate) -> Result<(), StorageError> {
        match predicate {
            Predicate::True => self.sql.push_str("TRUE"),
            Predicate::False => self.sql.push_str("FALSE"),
            Predicate::And(children) => self.group(children, " AND ", "TRUE")?,
            Predicate::Or(children) => self.group(children, " OR ", "FALSE")?,
            Predicate::Leaf(leaf) => self.leaf(leaf)?,
        }

        Ok(())
    }

    fn group(
        &mut self,
        children: &[Predicate],
        sep: &str,
        identity: &str,
    ) -> Result<(), StorageError> {
        if children.is_empty() {
            self.sql.push_str(identity);
            return Ok(());
        }

        self.sql.push('(');
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(sep);
            }
            self.predicate(child)?;
        }
        self.sql.push(')');

        Ok(())
    }

    fn leaf(&mut self, leaf: &LeafPredicate) -> Result<(), StorageError> {
        let field = self.field(&leaf.field)?;
        let column = quote(field.column);

        let clause = match leaf.op {
            LeafOp::IsNull => format!("{column} IS NULL"),
            LeafOp::IsNotNull => format!("{column} IS NOT NULL"),
            LeafOp::In if leaf.values.is_empty() => "FALSE".to_string(),
            LeafOp::In => {
                let params: Vec<String> =
                    leaf.values.iter().map(|v| self.bind(v.clone())).collect();
                format!("{column} IN ({})", params.join(", "))
            }
            op => {
                let operand = leaf.operand().cloned().ok_or_else(|| {
                    StorageError::internal(format!("{op} on '{}' has no operand", leaf.field))
                })?;
                match op {
                    LeafOp::Eq => format!("{column} = {}", self.bind(operand)),
                    LeafOp::Gte => format!("{column} >= {}", self.bind(operand)),
                    LeafOp::Lte => format!("{column} <= {}", self.bind(operand)),
                    _ if field.kind.is_list() => self.list_contains(&column, operand),
                    _ => {
                        let pattern = like_pattern(&operand);
                        format!("{column} ILIKE {}", self.bind(pattern))
                    }
                }
            }
        };
        self.sql.push_str(&clause);

        Ok(())
    }

    // Text elements fold case on both sides, matching ILIKE on scalar text.
    fn list_contains(&mut self, column: &str, operand: Value) -> String {
        let text = matches!(operand, Value::Text(_));
        let param = self.bind(operand);
        if text {
            format!("EXISTS (SELECT 1 FROM unnest({column}) AS e WHERE lower(e) = lower({param}))")
        } else {
            format!("{param} = ANY({column})")
        }
    }
}

fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

// Substring pattern with LIKE metacharacters escaped (backslash is the
// default PostgreSQL escape).
fn like_pattern(value: &Value) -> Value {
    let text = value.as_text().unwrap_or_default();
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');

    Value::Text(pattern)
}
