//! View rendering.

use scribe_core::ports::{RenderError, Rendered, View, ViewRenderer};

/// Renders a view as a JSON document: `{"view", "layout", "context"}`.
///
/// Clients (or an HTML front end) pick the template themselves; the server
/// only guarantees the shape of the context.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonViewRenderer;

impl ViewRenderer for JsonViewRenderer {
    fn render(&self, view: &View) -> Result<Rendered, RenderError> {
        let body = serde_json::to_string(view).map_err(|e| RenderError::Template(e.to_string()))?;

        Ok(Rendered {
            content_type: "application/json",
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::ports::Layout;
    use serde_json::{Value, json};

    #[test]
    fn test_render_view_document() {
        let view = View::new("post", Layout::Main, json!({ "title": "Hello" })).unwrap();

        let rendered = JsonViewRenderer.render(&view).unwrap();
        assert_eq!(rendered.content_type, "application/json");

        let doc: Value = serde_json::from_str(&rendered.body).unwrap();
        assert_eq!(doc["view"], "post");
        assert_eq!(doc["layout"], "main");
        assert_eq!(doc["context"]["title"], "Hello");
    }
}
