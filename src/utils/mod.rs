//! Small helpers shared across layers.

mod redirect;

pub use redirect::{safe_redirect, safe_redirect_or};
