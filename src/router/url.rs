//! Reverse generation: named route + parameters -> concrete path.

use http::Method;
use std::sync::Arc;
use tracing::debug;

use super::core::{CompiledRoute, Router};
use crate::error::{Result, RouterError};
use crate::placeholder::Occurrence;

impl Router {
    /// The single GET route labelled `name`.
    ///
    /// Zero or several carriers of the label are an [`RouterError::AmbiguousName`].
    pub fn named(&self, name: &str) -> Result<&Arc<CompiledRoute>> {
        let mut carriers = self
            .routes(&Method::GET)
            .iter()
            .filter(|route| route.name.as_deref() == Some(name));
        match (carriers.next(), carriers.count()) {
            (Some(route), 0) => Ok(route),
            (first, rest) => Err(RouterError::AmbiguousName {
                name: name.to_string(),
                matches: usize::from(first.is_some()) + rest,
            }),
        }
    }

    /// Build the path of route `name`, substituting placeholders by token.
    ///
    /// Keys are the placeholder tokens as written in the template, with or
    /// without the leading colon: `(":id", "7")` and `("id", "7")` both fill
    /// `/u/:id`. Only placeholder occurrences are replaced, never literal text.
    /// The result must match the route's own pattern.
    pub fn url(&self, name: &str, params: &[(&str, &str)]) -> Result<String> {
        let route = self.named(name)?;
        let occurrences = self.placeholders().occurrences(&route.template);
        let path = substitute(&route.template, &occurrences, |occ| {
            let token = occ.text.trim_start_matches(':');
            params
                .iter()
                .find(|(key, _)| key.trim_start_matches(':') == token)
                .map(|(_, value)| *value)
                .ok_or_else(|| RouterError::MissingParameter {
                    name: name.to_string(),
                    placeholder: occ.text.clone(),
                })
        })?;
        verify(route, name, path)
    }

    /// Build the path of route `name`, filling placeholders left to right.
    pub fn url_positional(&self, name: &str, values: &[&str]) -> Result<String> {
        let route = self.named(name)?;
        let occurrences = self.placeholders().occurrences(&route.template);
        let mut values = values.iter();
        let path = substitute(&route.template, &occurrences, |occ| {
            values
                .next()
                .copied()
                .ok_or_else(|| RouterError::MissingParameter {
                    name: name.to_string(),
                    placeholder: occ.text.clone(),
                })
        })?;
        verify(route, name, path)
    }
}

fn substitute<'v, F>(template: &str, occurrences: &[Occurrence], mut value_for: F) -> Result<String>
where
    F: FnMut(&Occurrence) -> Result<&'v str>,
{
    let mut path = String::with_capacity(template.len());
    let mut last = 0;
    for occ in occurrences {
        path.push_str(&template[last..occ.range.start]);
        path.push_str(value_for(occ)?);
        last = occ.range.end;
    }
    path.push_str(&template[last..]);
    Ok(path)
}

fn verify(route: &CompiledRoute, name: &str, path: String) -> Result<String> {
    if route.pattern.is_match(&path) {
        debug!(name = %name, template = %route.template, path = %path, "URL generated");
        Ok(path)
    } else {
        Err(RouterError::ParameterMismatch {
            name: name.to_string(),
            path,
        })
    }
}
