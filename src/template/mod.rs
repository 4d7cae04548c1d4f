//! The project's declarative state and everything rendered from it.
//!
//! - [`TemplateDict`] is the persisted `template.yml`
//! - [`TemplateState`] is the shared, run-scoped handle steps read from
//! - [`Modification`] describes a requested change to the dictionary
//! - [`Library`] gives access to installed resources and templates
//! - [`Renderer`] renders support files and template documents

pub mod dict;
pub mod kind;
pub mod library;
pub mod modification;
pub mod render;
pub mod state;

pub use dict::TemplateDict;
pub use kind::ResourceKind;
pub use library::{Library, SupportFile, TemplateSource, TEMPLATE_DICT, TEMPLATE_DOCUMENT};
pub use modification::Modification;
pub use render::{RenderContext, Renderer};
pub use state::TemplateState;
