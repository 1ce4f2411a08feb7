//! Shared models

mod declaration;
mod edit;
mod error;
mod span;

pub use declaration::{Declaration, DeclarationKind, Fidelity, InlineBody, ANONYMOUS};
pub use edit::{EditRequest, ExistingBlock};
pub use error::{DocstitchError, Result};
pub use span::Span;
