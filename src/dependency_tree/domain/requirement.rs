use super::{Constraint, PackageName};
use crate::shared::Result;

/// A parsed PEP 508 requirement such as `requests[socks]>=2.0; python_version>"3.8"`
///
/// Only the name and the specifier take part in the analysis. Extras, markers
/// and direct URL references are kept as text. A specifier that does not parse
/// degrades to [`Constraint::Any`] instead of failing the whole requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementSpec {
    name: PackageName,
    extras: Vec<String>,
    constraint: Constraint,
    marker: Option<String>,
    url: Option<String>,
}

impl RequirementSpec {
    pub fn new(name: PackageName, constraint: Constraint) -> Self {
        Self {
            name,
            extras: Vec::new(),
            constraint,
            marker: None,
            url: None,
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let (body, marker) = match text.split_once(';') {
            Some((body, marker)) => (body.trim(), Some(marker.trim().to_string())),
            None => (text.trim(), None),
        };

        let name_end = body
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
            .unwrap_or(body.len());
        let name = PackageName::new(&body[..name_end])
            .map_err(|e| anyhow::anyhow!("Invalid requirement '{}': {}", text.trim(), e))?;

        let mut rest = body[name_end..].trim_start();

        let mut extras = Vec::new();
        if let Some(after_bracket) = rest.strip_prefix('[') {
            let close = after_bracket
                .find(']')
                .ok_or_else(|| anyhow::anyhow!("Unclosed extras in requirement '{}'", text.trim()))?;
            extras = after_bracket[..close]
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from)
                .collect();
            rest = after_bracket[close + 1..].trim_start();
        }

        let mut url = None;
        let specifier = if let Some(reference) = rest.strip_prefix('@') {
            url = Some(reference.trim().to_string());
            ""
        } else {
            // Legacy metadata wraps the specifier in parentheses: `pbr (>=0.11)`
            rest.trim()
                .strip_prefix('(')
                .and_then(|s| s.strip_suffix(')'))
                .unwrap_or(rest)
        };

        let constraint = Constraint::parse(specifier).unwrap_or(Constraint::Any);

        Ok(Self {
            name,
            extras,
            constraint,
            marker: marker.filter(|m| !m.is_empty()),
            url,
        })
    }

    pub fn name(&self) -> &PackageName {
        &self.name
    }

    pub fn extras(&self) -> &[String] {
        &self.extras
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// True when the marker mentions `extra`, i.e. the requirement only
    /// applies when an optional feature of the package is requested
    pub fn is_extra_only(&self) -> bool {
        self.marker.as_deref().is_some_and(|marker| {
            marker
                .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .any(|token| token == "extra")
        })
    }
}
