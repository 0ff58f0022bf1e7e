//! Unit tests for the commons-release CLI
//!
//! These tests use mocked SCM providers and temp directories and run without
//! network access or an `svn` binary.

mod detachment_service;
mod helpers;
