//! Consensus - Decision Package Generation Service
//!
//! Turns a free-text problem description plus a small set of constraints into
//! a structured decision package by prompting a text-generation API, and
//! persists saved sessions in an embedded project store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
