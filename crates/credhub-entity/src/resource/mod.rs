//! Protected resource entity.

pub mod model;

pub use model::Resource;
