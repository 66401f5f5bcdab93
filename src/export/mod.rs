pub mod to_gexf;

/// Common rendering function used by template-based exporters
pub mod renderer {
    use handlebars::RenderError;
    use serde::Serialize;

    /// Render a template against a serializable context
    pub fn render_template<T: Serialize>(template: &str, context: &T) -> Result<String, RenderError> {
        let handlebars = crate::common::get_handlebars();
        handlebars.render_template(template, context)
    }
}
