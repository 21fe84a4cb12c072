//! ksbuild - kickstart fragment composition
//!
//! This crate merges fragments of kickstart configuration text into a
//! minimal set of non-conflicting composite documents, injecting mandatory
//! default settings into any composite that lacks them.

pub mod error;
pub mod fragment;
pub mod mandatory;
pub mod packer;
pub mod rules;

pub use error::MergeError;
pub use fragment::Fragment;
pub use mandatory::{ConfigError, MandatoryConfig, MandatorySet};
pub use packer::{build_composites, compose, compose_with};
