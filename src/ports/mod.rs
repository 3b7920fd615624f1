//! Ports (trait boundaries) for external dependencies.
//!
//! The core engine depends only on these traits. Storage, terminal I/O and
//! progress reporting are supplied by the adapters module.

pub mod observer;
pub mod presenter;
pub mod repository;

pub use observer::Observer;
pub use presenter::{MoveRequest, Presenter};
pub use repository::SnapshotRepository;
