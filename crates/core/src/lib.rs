//! Core types, traits and pure functions for usersvc.
//!
//! Everything in this crate is free of I/O: store and cache backends live in
//! the `usersvc` binary crate and plug in through the traits defined here.

pub mod blob;
pub mod cache;
pub mod image;
pub mod service;
pub mod storage;
pub mod user;
