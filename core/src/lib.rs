// lets the derive's `::structinsert::` paths resolve inside this crate too
extern crate self as structinsert;

mod describe;
mod descriptor;
mod driver;
mod error;
mod insert;
mod shape;
mod value;

pub use structinsert_macros::Entity;

pub use describe::{describe, describe_many, describe_one, Description, Placeholder};
pub use descriptor::{Descriptor, Entry};
pub use driver::{Connection, Statement};
pub use error::{DriverError, Error, ErrorKind, Result, ShapeError};
pub use insert::{insert_many, insert_one, InsertReport, Inserter};
pub use shape::{Entity, Insertable, Record, Shape};
pub use value::{Row, ToValue, Value};
