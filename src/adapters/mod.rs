//! Adapters implementing the ports.

pub mod console;
pub mod in_memory_repository;
pub mod msgpack_repository;
pub mod progress;

pub use console::{ConsolePresenter, HeadlessPresenter};
pub use in_memory_repository::InMemoryRepository;
pub use msgpack_repository::MsgPackRepository;
pub use progress::{LogObserver, ProgressObserver};
