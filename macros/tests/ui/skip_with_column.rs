#![allow(dead_code)]
use structinsert_macros::Entity;

#[derive(Entity)]
struct Row {
    #[db(column = "id", skip)]
    id: i64,
}

fn main() {}
