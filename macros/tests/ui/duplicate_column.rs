#![allow(dead_code)]
use structinsert_macros::Entity;

#[derive(Entity)]
struct Row {
    #[db(column = "id")]
    id: i64,
    #[db(column = "id")]
    other_id: i64,
}

fn main() {}
