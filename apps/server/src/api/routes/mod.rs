//! Route tables

pub mod entities;
