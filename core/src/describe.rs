use std::fmt::Write;

use crate::descriptor::Descriptor;
use crate::error::{Error, Result, ShapeError};
use crate::shape::{Insertable, Record, Shape};
use crate::value::Row;

/// Parameter marker style used when rendering the INSERT template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placeholder {
    /// `?, ?, ?`
    #[default]
    Question,
    /// `?1, ?2, ?3`
    Numbered,
}

/// Columns of one entity type plus the records that will be bound to them.
pub struct Description<'a> {
    descriptor: Descriptor,
    columns: Vec<&'static str>,
    records: Vec<&'a dyn Record>,
}

/// Describes either a single struct or a non-empty sequence of them.
pub fn describe(value: &dyn Insertable) -> Result<Description<'_>> {
    match value.shape() {
        Shape::Record(record) => Description::from_records(vec![record], true),
        Shape::Sequence { items, fixed_layout } => describe_sequence(items, fixed_layout),
        Shape::Scalar(found) => Err(ShapeError::NotAStruct { found }.into()),
    }
}

pub fn describe_one(value: &dyn Insertable) -> Result<Description<'_>> {
    match value.shape() {
        Shape::Record(record) => Description::from_records(vec![record], true),
        Shape::Sequence { .. } => Err(ShapeError::UnexpectedSequence.into()),
        Shape::Scalar(found) => Err(ShapeError::NotAStruct { found }.into()),
    }
}

pub fn describe_many(value: &dyn Insertable) -> Result<Description<'_>> {
    match value.shape() {
        Shape::Sequence { items, fixed_layout } => describe_sequence(items, fixed_layout),
        Shape::Record(record) => {
            let found = record.describe().entity();
            Err(ShapeError::NotASequence { found }.into())
        }
        Shape::Scalar(found) => Err(ShapeError::NotASequence { found }.into()),
    }
}

fn describe_sequence(items: Vec<&dyn Insertable>, fixed_layout: bool) -> Result<Description<'_>> {
    if items.is_empty() {
        return Err(ShapeError::EmptySequence.into());
    }

    let records = items.into_iter()
        .enumerate()
        .map(|(index, item)| match item.shape() {
            Shape::Record(record) => Ok(record),
            Shape::Sequence { .. } => Err(ShapeError::ElementNotAStruct { index, found: "sequence" }),
            Shape::Scalar(found) => Err(ShapeError::ElementNotAStruct { index, found }),
        })
        .collect::<Result<Vec<_>, ShapeError>>()?;

    Description::from_records(records, fixed_layout)
}

impl<'a> Description<'a> {
    /// Columns come from the first record. The rest are only described
    /// again when their type does not already guarantee the same layout.
    fn from_records(records: Vec<&'a dyn Record>, fixed_layout: bool) -> Result<Self> {
        // callers never pass an empty list, but don't index blindly
        let first = records.first().ok_or(ShapeError::EmptySequence)?;

        let descriptor = first.describe();
        let columns = descriptor.columns();

        if columns.is_empty() {
            return Err(Error::EmptyEntity { entity: descriptor.entity() });
        }

        // flattened groups can bring in a name the parent already maps
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(ShapeError::DuplicateColumn {
                    entity: descriptor.entity(),
                    column: *column,
                }.into());
            }
        }

        if !fixed_layout {
            for (index, record) in records.iter().enumerate().skip(1) {
                let other = record.describe();
                if other.columns() != columns {
                    return Err(ShapeError::Heterogeneous {
                        index,
                        expected: descriptor.entity(),
                        found: other.entity(),
                    }.into());
                }
            }
        }

        Ok(Description { descriptor, columns, records })
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn entity(&self) -> &'static str {
        self.descriptor.entity()
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// Number of records to insert.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Bound values for each record, in input order.
    pub fn rows(&self) -> impl Iterator<Item = Result<Row, ShapeError>> + '_ {
        self.records.iter()
            .enumerate()
            .map(|(index, record)| self.values(index, *record))
    }

    fn values(&self, index: usize, record: &dyn Record) -> Result<Row, ShapeError> {
        let mut row = Row::with_capacity(self.columns.len());
        record.bind_row(&mut row);

        if row.len() != self.columns.len() {
            return Err(ShapeError::ArityMismatch {
                index,
                expected: self.columns.len(),
                found: row.len(),
            });
        }

        Ok(row)
    }

    /// Renders `INSERT INTO table (a, b) VALUES (?, ?)`.
    pub fn sql(&self, table: &str, placeholder: Placeholder) -> String {
        let mut sql = format!("INSERT INTO {} ({}) VALUES (", table, self.columns.join(", "));

        for i in 0..self.columns.len() {
            if i > 0 {
                sql.push_str(", ");
            }
            match placeholder {
                Placeholder::Question => sql.push('?'),
                // writing to a String cannot fail
                Placeholder::Numbered => { let _ = write!(sql, "?{}", i + 1); }
            }
        }

        sql.push(')');
        sql
    }
}
