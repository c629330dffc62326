//! The NLOD algorithm: ranking, alignment and aggregation.

pub mod alignment;
pub mod nlod;
pub mod ranking;
