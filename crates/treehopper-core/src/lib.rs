//! Treehopper Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Treehopper
//! parser and renderer. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Drawable primitives for the diagram canvas ([`draw`] module)
//! - **Semantic**: The extracted component model ([`semantic`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod semantic;
