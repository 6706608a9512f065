//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod page_view;
pub mod registrant;

pub use page_view::PageViewEntity;
pub use registrant::RegistrantEntity;
