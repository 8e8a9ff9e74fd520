use crate::{
    db::filter::{Criterion, Operator, ValidationError},
    model::{
        entity::EntityModel,
        field::{FieldKind, FieldModel},
    },
    value::Value,
};

/// Validate one supplied criterion against the entity model.
pub(crate) fn validate_criterion(
    model: &EntityModel,
    criterion: &Criterion,
) -> Result<&'static FieldModel, ValidationError> {
    let field = model
        .field(criterion.field())
        .ok_or_else(|| ValidationError::UnknownField {
            entity: model.path,
            field: criterion.field().to_string(),
        })?;

    ensure_operator(field, criterion.op())?;

    let values = criterion.values().unwrap_or_default();
    match criterion.op() {
        Operator::Eq | Operator::Gte | Operator::Lte => {
            ensure_arity(field, values, 1)?;
            ensure_literals(field, field.kind, values)
        }
        Operator::In => ensure_literals(field, field.kind, values),
        Operator::Range => {
            ensure_arity(field, values, 2)?;
            let bounds: Vec<Value> = values.iter().filter(|v| !v.is_null()).cloned().collect();
            ensure_literals(field, field.kind, &bounds)
        }
        Operator::Contains => ensure_literals(field, *field.kind.element(), values),
        Operator::Exists => match values {
            [Value::Bool(_)] => Ok(()),
            _ => Err(ValidationError::invalid_literal(
                field.name,
                "EXISTS takes a single boolean",
            )),
        },
    }?;

    Ok(field)
}

// Operator/kind compatibility.
fn ensure_operator(field: &FieldModel, op: Operator) -> Result<(), ValidationError> {
    let supported = match op {
        Operator::Eq | Operator::In => !field.kind.is_list(),
        Operator::Range | Operator::Gte | Operator::Lte => field.kind.is_orderable(),
        Operator::Contains => field.kind.is_text() || field.kind.is_list(),
        Operator::Exists => true,
    };

    if supported {
        Ok(())
    } else {
        Err(ValidationError::InvalidOperator {
            field: field.name.to_string(),
            op,
            kind: field.kind.to_string(),
        })
    }
}

fn ensure_arity(field: &FieldModel, values: &[Value], expected: usize) -> Result<(), ValidationError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(ValidationError::invalid_literal(
            field.name,
            format!("expected {expected} value(s), got {}", values.len()),
        ))
    }
}

fn ensure_literals(
    field: &FieldModel,
    kind: FieldKind,
    values: &[Value],
) -> Result<(), ValidationError> {
    for value in values {
        if !kind.accepts(value) {
            return Err(ValidationError::invalid_literal(
                field.name,
                format!("expected {kind} literal, got {}", value.label()),
            ));
        }
    }

    Ok(())
}
