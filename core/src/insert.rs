use tracing::{debug, trace, warn};

use crate::describe::{describe_many, describe_one, Description, Placeholder};
use crate::driver::{Connection, Statement};
use crate::error::{Error, Result};
use crate::shape::Insertable;

/// Outcome of a successful insert call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertReport {
    /// Statement executions, one per record.
    pub executions: usize,
    /// Sum of the rows-affected counts the driver reported.
    pub rows_affected: usize,
}

/// Inserts structs through one prepared statement per call.
///
/// Every call prepares its own statement, executes it once per record and
/// closes it before returning, on success and on failure alike. Nothing is
/// cached between calls.
pub struct Inserter<'c, C> {
    conn: &'c C,
    placeholder: Placeholder,
}

impl<'c, C: Connection> Inserter<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Inserter { conn, placeholder: Placeholder::default() }
    }

    pub fn placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Inserts a single struct. Sequences and scalars are rejected.
    pub fn insert_one(&self, table: &str, value: &dyn Insertable) -> Result<InsertReport> {
        let description = describe_one(value)?;
        self.execute(table, &description)
    }

    /// Inserts every struct of a non-empty sequence, in order. Stops at the
    /// first failed execution; rows already inserted stay inserted.
    pub fn insert_many(&self, table: &str, values: &dyn Insertable) -> Result<InsertReport> {
        let description = describe_many(values)?;
        self.execute(table, &description)
    }

    fn execute(&self, table: &str, description: &Description<'_>) -> Result<InsertReport> {
        let sql = description.sql(table, self.placeholder);

        debug!(
            table,
            entity = description.entity(),
            columns = description.columns().len(),
            records = description.len(),
            "preparing insert"
        );

        let mut stmt = match self.conn.prepare(&sql) {
            Ok(stmt) => stmt,
            Err(source) => return Err(Error::PrepareFailed { sql, source }),
        };

        let outcome = execute_all(&mut stmt, description);

        match (outcome, stmt.close()) {
            (Ok(report), Ok(())) => {
                debug!(table, executions = report.executions, rows_affected = report.rows_affected, "insert complete");
                Ok(report)
            }
            (Ok(report), Err(source)) => {
                Err(Error::CloseFailed { rows_inserted: report.executions, source })
            }
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(close_err)) => {
                warn!(table, error = %close_err, "closing statement after failed insert");
                Err(err)
            }
        }
    }
}

fn execute_all<S: Statement>(stmt: &mut S, description: &Description<'_>) -> Result<InsertReport> {
    let mut report = InsertReport::default();

    for (index, row) in description.rows().enumerate() {
        let row = row?;

        trace!(index, "executing insert");

        let affected = stmt.execute(&row)
            .map_err(|source| Error::ExecFailed {
                index,
                rows_inserted: report.executions,
                source,
            })?;

        report.executions += 1;
        report.rows_affected += affected;
    }

    Ok(report)
}

/// [`Inserter::insert_one`] with default options.
pub fn insert_one<C: Connection>(conn: &C, table: &str, value: &dyn Insertable) -> Result<InsertReport> {
    Inserter::new(conn).insert_one(table, value)
}

/// [`Inserter::insert_many`] with default options.
pub fn insert_many<C: Connection>(conn: &C, table: &str, values: &dyn Insertable) -> Result<InsertReport> {
    Inserter::new(conn).insert_many(table, values)
}
