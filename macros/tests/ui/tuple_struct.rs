#![allow(dead_code)]
use structinsert_macros::Entity;

#[derive(Entity)]
struct Pair(i64, i64);

fn main() {}
