//! Track lists: where they come from and how they are shown.

mod catalog;
mod model;
mod scan;
mod view;

pub use catalog::{CatalogError, load_catalog};
pub use model::Track;
pub use scan::scan;
pub use view::{ViewQuery, view};
