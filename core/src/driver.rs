//! The database side of an insert: something that can prepare a statement,
//! and a statement that can be executed repeatedly and then closed.

use crate::error::DriverError;
use crate::value::Value;

pub trait Connection {
    type Statement<'c>: Statement where Self: 'c;

    fn prepare<'c>(&'c self, sql: &str) -> Result<Self::Statement<'c>, DriverError>;
}

pub trait Statement {
    /// Runs the statement with positional parameters, returning rows affected.
    fn execute(&mut self, params: &[Value]) -> Result<usize, DriverError>;

    fn close(self) -> Result<(), DriverError>;
}

impl Connection for rusqlite::Connection {
    type Statement<'c> = rusqlite::Statement<'c> where Self: 'c;

    fn prepare<'c>(&'c self, sql: &str) -> Result<rusqlite::Statement<'c>, DriverError> {
        Ok(rusqlite::Connection::prepare(self, sql)?)
    }
}

// a transaction is just a connection with a pending commit; the caller
// decides whether a half-finished batch gets rolled back
impl Connection for rusqlite::Transaction<'_> {
    type Statement<'c> = rusqlite::Statement<'c> where Self: 'c;

    fn prepare<'c>(&'c self, sql: &str) -> Result<rusqlite::Statement<'c>, DriverError> {
        Connection::prepare(&**self, sql)
    }
}

impl Statement for rusqlite::Statement<'_> {
    fn execute(&mut self, params: &[Value]) -> Result<usize, DriverError> {
        let params = rusqlite::params_from_iter(params);
        Ok(rusqlite::Statement::execute(self, params)?)
    }

    fn close(self) -> Result<(), DriverError> {
        Ok(self.finalize()?)
    }
}
