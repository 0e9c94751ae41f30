pub mod document;
pub mod export;
pub mod message;

pub use document::*;
pub use export::*;
pub use message::*;
