#![allow(dead_code)]

use std::cell::RefCell;

use chrono::{DateTime, TimeZone, Utc};
use structinsert::{Connection, DriverError, Entity, Statement, Value};

#[derive(Entity, Clone)]
pub struct BasicFields {
    #[db(column = "id")]
    pub id: i64,
    #[db(column = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Entity, Clone)]
pub struct TestStruct {
    #[db(flatten)]
    pub basic: BasicFields,

    #[db(column = "ptr")]
    pub ptr: Option<Box<bool>>,
    #[db(column = "nilptr")]
    pub nil_ptr: Option<Box<bool>>,

    #[db(skip)]
    pub should_be_ignored: bool,
    pub no_tag: bool,
}

#[derive(Entity, Clone)]
pub struct EmptyStruct {}

pub const PARAM_A: i64 = 42;
pub const INSERT_QUERY: &str = "INSERT INTO test (id, createdAt, ptr, nilptr) VALUES (?, ?, ?, ?)";

pub fn time_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 9, 14, 8, 0, 0).unwrap()
}

pub fn one_struct() -> TestStruct {
    TestStruct {
        basic: BasicFields { id: PARAM_A, created_at: time_now() },
        ptr: Some(Box::new(true)),
        nil_ptr: None,
        should_be_ignored: true,
        no_tag: true,
    }
}

pub fn structs() -> Vec<TestStruct> {
    vec![one_struct(), one_struct(), one_struct()]
}

/// Positional arguments every `one_struct()` binds.
pub fn expected_args() -> Vec<Value> {
    vec![
        Value::Integer(PARAM_A),
        Value::Text(time_now().to_rfc3339()),
        Value::Integer(1),
        Value::Null,
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Prepare(String),
    Exec(Vec<Value>),
    Close,
}

/// Records every call the executor makes and fails on request.
#[derive(Default)]
pub struct MockConnection {
    events: RefCell<Vec<Event>>,
    fail_prepare: bool,
    fail_exec_at: Option<usize>,
    fail_close: bool,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_prepare(mut self) -> Self {
        self.fail_prepare = true;
        self
    }

    pub fn fail_exec_at(mut self, index: usize) -> Self {
        self.fail_exec_at = Some(index);
        self
    }

    pub fn fail_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }

    fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl Connection for MockConnection {
    type Statement<'c> = MockStatement<'c> where Self: 'c;

    fn prepare<'c>(&'c self, sql: &str) -> Result<MockStatement<'c>, DriverError> {
        self.record(Event::Prepare(sql.to_owned()));

        if self.fail_prepare {
            return Err("sql error".into());
        }

        Ok(MockStatement { conn: self, executed: 0 })
    }
}

pub struct MockStatement<'c> {
    conn: &'c MockConnection,
    executed: usize,
}

impl Statement for MockStatement<'_> {
    fn execute(&mut self, params: &[Value]) -> Result<usize, DriverError> {
        self.conn.record(Event::Exec(params.to_vec()));

        let index = self.executed;
        self.executed += 1;

        if self.conn.fail_exec_at == Some(index) {
            return Err("sql error".into());
        }

        Ok(1)
    }

    fn close(self) -> Result<(), DriverError> {
        self.conn.record(Event::Close);

        if self.conn.fail_close {
            return Err("close error".into());
        }

        Ok(())
    }
}
