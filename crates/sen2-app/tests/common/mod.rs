//! Shared test utilities.

#![allow(dead_code)]

pub mod mock_backend;
