#![allow(dead_code)]
use structinsert_macros::Entity;

#[derive(Entity)]
struct Row {
    #[db(flatten, skip)]
    inner: i64,
}

fn main() {}
