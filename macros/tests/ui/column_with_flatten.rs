#![allow(dead_code)]
use structinsert_macros::Entity;

#[derive(Entity)]
struct Row {
    #[db(column = "inner", flatten)]
    inner: i64,
}

fn main() {}
