//! Coverage model: design → covergroups → coverpoints/crosses → bins.

pub mod bin;
pub mod index;
pub mod report;
pub mod scope;

pub use bin::{Bin, BinStatus};
pub use index::{ScopeIndex, ScopeRef};
pub use report::{CoverageReport, Covergroup, ItemKey, UncoveredItem};
pub use scope::{BinScope, Coverpoint, CrossCoverage, ScopeKind};
