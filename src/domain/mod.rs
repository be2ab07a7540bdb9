//! Domain Layer
//!
//! Pure asset-publishing logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Package, module configuration tree, `.gitignore` lines
//! - `value_objects/` - Asset group names, skip reasons
//! - `services/` - PHP lexer, safety gate, static configuration reader
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Services work on text and values; files are reached through ports
//! 2. **Ports & Adapters** - Filesystem, install paths and diagnostics are traits

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
