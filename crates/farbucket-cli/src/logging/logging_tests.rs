#![allow(non_snake_case)]

use super::*;

#[test]
fn default_directive___verbose___raises_to_debug() {
    assert_eq!(default_directive("warn", true), "debug");
}

#[test]
fn default_directive___not_verbose___uses_level() {
    assert_eq!(default_directive("warn", false), "warn");
}
