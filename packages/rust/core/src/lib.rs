//! Core pipelines for the OWNERS tools.
//!
//! Two independent workflows share this crate:
//! - [`audit`]: scan a tree of OWNERS files and reconcile it against the
//!   repository's collaborators
//! - [`generate`]: derive an OWNERS file from a chart's maintainers

pub mod alias;
pub mod audit;
pub mod generate;
pub mod maintainers;
pub mod reconcile;
pub mod resolver;
pub mod scanner;
pub mod writer;

#[cfg(test)]
mod testing;
