//! Drafter Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Drafter import
//! pipeline. It includes:
//!
//! - **Document model**: the declarative diagram description ([`document`] module)
//! - **Geometry**: points, sizes and bounds in canvas units ([`geometry`] module)
//! - **Canvas**: the collaborator interface the engine draws through, plus an
//!   in-memory implementation ([`canvas`] module)
//! - **Formulas**: quoting of literal cell formulas ([`formula`] module)

pub mod canvas;
pub mod document;
pub mod formula;
pub mod geometry;
