// Error types
pub mod error;

// Format adapter trait
pub mod traits;

// Structural format detection
pub mod detect;

// Format adapters
pub mod rich;
pub mod turn_pair;

// Document assembly and lenient field extraction
pub(crate) mod builder;
pub(crate) mod extract;

// Format registry
pub mod registry;

// Entry points
pub mod loader;

pub use traits::FormatAdapter;

pub use detect::{detect, detect_or_err};

pub use rich::{RichConversationAdapter, RichExportAdapter};
pub use turn_pair::TurnPairAdapter;

pub use registry::{
    FormatMetadata, create_adapter, get_all_formats, get_format_metadata,
    platform_from_file_name, resolve_platform,
};

pub use loader::{load_file, load_str, load_value};

// Error types
pub use error::{Error, ErrorKind, Result};
