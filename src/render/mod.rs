//! Graph layout rendering.
//!
//! The layout program is the only external process the views depend on.
//! It sits behind the `Renderer` trait so handlers can be exercised with
//! a stand-in, and so a missing program surfaces as its own error.

pub mod process;
pub mod svg;

use crate::utils::error::RenderError;
use async_trait::async_trait;

pub use process::DotRenderer;
pub use svg::strip_prolog;

/// Turns a textual graph description into image bytes
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, description: &[u8]) -> Result<Vec<u8>, RenderError>;
}
