//! The recipe-family core: normalization, catalog resolution, family
//! grouping, and translation orchestration.

pub mod catalog;
pub mod family;
pub mod normalize;
pub mod translate;
