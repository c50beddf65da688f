pub mod pagination_controls;
pub mod ui;

pub use pagination_controls::PaginationControls;
