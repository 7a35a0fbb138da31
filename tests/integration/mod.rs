//! Integration tests for dbrl
//!
//! This module contains shared helpers and the tests that drive a real
//! container engine. Engine tests only run with the matching cargo feature.

pub mod common;
pub mod docker;
pub mod podman;
