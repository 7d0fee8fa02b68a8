#![allow(dead_code)]
use structinsert_macros::Entity;

#[derive(Entity)]
union Bits {
    int: u32,
    float: f32,
}

fn main() {}
