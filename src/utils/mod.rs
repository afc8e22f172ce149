//! Utility modules: save-file storage.

#![allow(unused_imports)]

pub mod persistence;

pub use persistence::*;
