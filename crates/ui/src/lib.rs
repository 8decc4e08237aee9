//! Presentation models for the tutor front end.
//!
//! Everything here is a pure function of service data; rendering is left to
//! the binary.

pub mod vm;
