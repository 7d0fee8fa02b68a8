#![allow(dead_code)]
use structinsert_macros::Entity;

#[derive(Entity)]
enum Kind {
    A,
    B,
}

fn main() {}
