//! Request handlers

pub mod entities;
