//! Integration test entry point.

mod helpers;

mod auth_test;
mod lifecycle_test;
mod rotation_test;
