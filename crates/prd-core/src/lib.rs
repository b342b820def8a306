pub mod classifier;
pub mod config;
pub mod error;
pub mod extract;
pub mod parser;
pub mod prd;
pub mod render;
pub mod section;
pub mod timeline;
pub mod title;
pub mod types;
pub mod upload;
pub mod validate;

pub use error::{PrdError, Result};
pub use parser::{parse, parse_and_validate, ParseOutcome};
pub use prd::{ParsedPrd, Timeline};
pub use types::{FieldKind, PrdType, SectionId};
pub use validate::{validate, ValidationResult};
