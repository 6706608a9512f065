//! Repository implementations for database operations.

pub mod page_view;
pub mod registrant;

pub use page_view::PageViewRepository;
pub use registrant::RegistrantRepository;
