use crate::foundation::error::{CoverError, CoverResult};

/// The two fixed cover layouts.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Generic study-guide cover, mounted at `/`.
    Study,
    /// Exam-prep cover, mounted at `/teas`.
    Teas,
}

impl TemplateKind {
    /// Every template, in navigation order.
    pub const ALL: [TemplateKind; 2] = [TemplateKind::Study, TemplateKind::Teas];

    /// Route path the template is mounted at.
    pub fn route(self) -> &'static str {
        match self {
            TemplateKind::Study => "/",
            TemplateKind::Teas => "/teas",
        }
    }

    /// Label shown in the persistent top navigation.
    pub fn nav_label(self) -> &'static str {
        match self {
            TemplateKind::Study => "VTNE Cover",
            TemplateKind::Teas => "TEAS Cover",
        }
    }

    /// Stable lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Study => "study",
            TemplateKind::Teas => "teas",
        }
    }

    /// Resolve a route path. Query strings and fragments are not part of any route.
    pub fn from_route(route: &str) -> CoverResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.route() == route)
            .ok_or_else(|| CoverError::validation(format!("unknown route '{route}'")))
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TemplateKind {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "study" => Ok(TemplateKind::Study),
            "teas" => Ok(TemplateKind::Teas),
            other => Err(CoverError::validation(format!(
                "unknown template '{other}' (expected 'study' or 'teas')"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/kind.rs"]
mod tests;
