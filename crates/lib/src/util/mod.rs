//! Test helpers shared across module tests.

pub mod testutil;
