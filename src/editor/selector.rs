use crate::{
    editor::context::EditorContext,
    foundation::error::CoverResult,
    template::kind::TemplateKind,
};

/// One entry of the persistent top navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct NavLink {
    /// Link text.
    pub label: &'static str,
    /// Route it navigates to.
    pub route: &'static str,
    /// The link points at the mounted template.
    pub active: bool,
}

/// Routes between the two templates. Exactly one editor is mounted at a time.
#[derive(Debug)]
pub struct TemplateSelector {
    current: EditorContext,
}

impl Default for TemplateSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateSelector {
    /// Start at `/` with the study template mounted.
    pub fn new() -> Self {
        Self::with_template(TemplateKind::Study)
    }

    /// Start with `kind` mounted.
    pub fn with_template(kind: TemplateKind) -> Self {
        Self {
            current: EditorContext::new(kind),
        }
    }

    /// Route of the mounted template.
    pub fn route(&self) -> &'static str {
        self.current.kind().route()
    }

    /// Mounted editor.
    pub fn current(&self) -> &EditorContext {
        &self.current
    }

    /// Mounted editor, mutably.
    pub fn current_mut(&mut self) -> &mut EditorContext {
        &mut self.current
    }

    /// Navigate to `route`. Returns whether a different template was mounted.
    ///
    /// Unknown routes are rejected and the mounted editor stays. Switching templates drops every
    /// piece of editor state: fields, background, transform, previews and artifacts.
    pub fn navigate(&mut self, route: &str) -> CoverResult<bool> {
        let kind = TemplateKind::from_route(route)?;
        if kind == self.current.kind() {
            tracing::debug!(route, "already mounted");
            return Ok(false);
        }
        tracing::debug!(from = self.route(), to = route, "switching template");
        self.current = EditorContext::new(kind);
        Ok(true)
    }

    /// Navigation entries, in display order.
    pub fn nav_links(&self) -> Vec<NavLink> {
        TemplateKind::ALL
            .into_iter()
            .map(|k| NavLink {
                label: k.nav_label(),
                route: k.route(),
                active: k == self.current.kind(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/selector.rs"]
mod tests;
