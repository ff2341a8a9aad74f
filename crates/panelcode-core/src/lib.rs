//! Panelcode Core Types
//!
//! This crate provides the foundational types of the Panelcode comic layout
//! notation. It includes:
//!
//! - **Attributes**: raw attribute tokens ([`attribute::Attribute`])
//! - **Options**: resolved per-node option sets ([`options::OptionSet`])
//! - **Cascade**: level-cascading option lookup ([`cascade::Cascade`])
//! - **Levels**: the five structural levels ([`level::Level`])
//! - **Model**: the typed document tree ([`model`] module)

pub mod attribute;
pub mod cascade;
pub mod level;
pub mod model;
pub mod options;
