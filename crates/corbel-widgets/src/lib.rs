#![forbid(unsafe_code)]

//! Headless component state machines.
//!
//! Each module pairs a configuration type (what the component is) with a
//! state type (where the user has taken it) and pure operations between
//! them. Nothing here draws: components expose their geometry through
//! `corbel-layout` types and mutate state in response to
//! `corbel-core` key events, leaving rendering and pointer hit-testing to
//! the embedding application.
//!
//! - [`pagination`]: record navigator with page-size handling and a
//!   planned marker strip.
//! - [`cascader`]: hierarchical options in columns, placed as a floating
//!   panel.
//! - [`tag_input`]: tag list editing with draft text and validation.
//! - [`upload`]: file constraint checking for upload pickers.
//!
//! # Features
//!
//! - `state-persistence`: serde derives on state types so sessions can be
//!   saved and restored.
//! - `tracing`: debug-level events on state transitions.

pub mod cascader;
pub mod pagination;
pub mod tag_input;
pub mod upload;

pub use cascader::{
    Cascader, CascaderColumn, CascaderOption, CascaderOutcome, CascaderPersistState, CascaderState,
};
pub use pagination::{PagerItem, Pagination, PaginationState};
pub use tag_input::{TagInput, TagInputState, TagRejection};
pub use upload::{UploadPolicy, UploadRejection};
