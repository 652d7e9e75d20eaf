//! Content query handlers.

mod get_step_content;

pub use get_step_content::{
    GetStepContentError, GetStepContentHandler, GetStepContentQuery, GetStepContentResult,
};
