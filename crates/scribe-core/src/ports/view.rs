//! Templating port.

use serde::Serialize;

/// Page chrome a view is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Main,
    Admin,
    Login,
}

/// A named view plus the data it is rendered with.
#[derive(Debug, Clone, Serialize)]
pub struct View {
    #[serde(rename = "view")]
    pub name: &'static str,
    pub layout: Layout,
    pub context: serde_json::Value,
}

impl View {
    pub fn new(
        name: &'static str,
        layout: Layout,
        context: impl Serialize,
    ) -> Result<Self, RenderError> {
        let context =
            serde_json::to_value(context).map_err(|e| RenderError::Context(e.to_string()))?;
        Ok(Self {
            name,
            layout,
            context,
        })
    }
}

/// Output of a renderer.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub content_type: &'static str,
    pub body: String,
}

/// Template engine abstraction.
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &View) -> Result<Rendered, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid view context: {0}")]
    Context(String),

    #[error("Template failed: {0}")]
    Template(String),
}
