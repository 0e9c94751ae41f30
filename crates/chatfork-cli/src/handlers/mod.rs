mod context;

pub mod export;
pub mod forks;
pub mod inspect;
pub mod view;

pub use context::HandlerContext;
