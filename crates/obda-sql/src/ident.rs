//! Conversion from sqlparser identifiers to normalized ids

use crate::error::{SqlError, SqlResult};
use obda_core::{QuotedId, QuotedIdFactory, RelationId};
use sqlparser::ast::{Ident, ObjectName};

/// Normalize one identifier; a quote style marks it as delimited
pub(crate) fn quoted_id(factory: &QuotedIdFactory, ident: &Ident) -> SqlResult<QuotedId> {
    Ok(factory.create_id(&ident.value, ident.quote_style.is_some())?)
}

/// Plain identifier parts of an object name
pub(crate) fn name_parts(name: &ObjectName) -> SqlResult<Vec<&Ident>> {
    name.0
        .iter()
        .map(|part| {
            part.as_ident()
                .ok_or_else(|| SqlError::UnsupportedConstruct(format!("object name '{}'", name)))
        })
        .collect()
}

/// Relation id from `table` or `schema.table`
pub(crate) fn relation_id(factory: &QuotedIdFactory, parts: &[&Ident]) -> SqlResult<RelationId> {
    match parts {
        [table] => Ok(RelationId::table_only(quoted_id(factory, table)?)),
        [schema, table] => Ok(RelationId::new(
            Some(quoted_id(factory, schema)?),
            quoted_id(factory, table)?,
        )),
        _ => Err(SqlError::UnsupportedConstruct(format!(
            "relation name with {} parts",
            parts.len()
        ))),
    }
}

/// Column named in a `USING` list
pub(crate) fn using_column(factory: &QuotedIdFactory, name: &ObjectName) -> SqlResult<QuotedId> {
    match name_parts(name)?.as_slice() {
        [column] => quoted_id(factory, column),
        _ => Err(SqlError::UnsupportedConstruct(format!(
            "qualified USING column '{}'",
            name
        ))),
    }
}
