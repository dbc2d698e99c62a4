use crate::{
    data::{Interaction, RequestData, RequestSpec},
    util,
};
use serde_json::Value;

/// Matches observed requests against configured interactions.
///
/// Every interaction can be matched once. When several unconsumed interactions
/// qualify, the one declared first wins.
#[derive(Debug, Default)]
pub struct InteractionMatcher {
    interactions: Vec<Interaction>,
    consumed: Vec<bool>,
}

impl InteractionMatcher {
    pub fn new(interactions: Vec<Interaction>) -> Self {
        let consumed = vec![false; interactions.len()];

        Self {
            interactions,
            consumed,
        }
    }

    /// Find and consume the interaction for the request.
    pub fn match_request(&mut self, request: &RequestData) -> Option<&Interaction> {
        let index = self
            .interactions
            .iter()
            .zip(self.consumed.iter())
            .position(|(interaction, consumed)| {
                !*consumed && request_matches(&interaction.request, request)
            })?;

        self.consumed[index] = true;
        Some(&self.interactions[index])
    }

    pub fn unmatched_description(request: &RequestData) -> String {
        format!(
            "No interaction found for {} {}",
            request.method.to_uppercase(),
            request.uri
        )
    }
}

fn request_matches(expected: &RequestSpec, actual: &RequestData) -> bool {
    expected.method.eq_ignore_ascii_case(&actual.method)
        && path_matches(&expected.path, actual)
        && headers_match(expected, actual)
        && body_matches(expected.body.as_ref(), &actual.body)
}

fn path_matches(expected: &str, actual: &RequestData) -> bool {
    if expected.contains('?') {
        expected == actual.uri
    } else {
        expected == actual.path()
    }
}

fn headers_match(expected: &RequestSpec, actual: &RequestData) -> bool {
    expected.headers.iter().all(|(name, value)| {
        util::find_header(&actual.headers, name)
            .map(|actual_value| actual_value.trim() == value.trim())
            .unwrap_or(false)
    })
}

fn body_matches(expected: Option<&Value>, actual: &str) -> bool {
    let expected = match expected {
        Some(expected) => expected,
        None => return true,
    };

    match serde_json::from_str::<Value>(actual) {
        Ok(actual) => expected == &actual,
        Err(_) => expected.as_str() == Some(actual),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ResponseSpec;
    use serde_json::json;
    use std::collections::HashMap;

    fn interaction(
        description: &str,
        method: &str,
        path: &str,
        headers: &[(&str, &str)],
        body: Option<Value>,
    ) -> Interaction {
        Interaction {
            provider_state: None,
            description: description.into(),
            request: RequestSpec {
                method: method.into(),
                path: path.into(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body,
            },
            response: ResponseSpec {
                status_code: 200,
                headers: HashMap::new(),
                body: None,
            },
        }
    }

    fn request(method: &str, uri: &str, headers: &[(&str, &str)], body: &str) -> RequestData {
        RequestData {
            method: method.into(),
            uri: uri.into(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.into(),
        }
    }

    #[test]
    fn test_matches_method_and_path() {
        let mut matcher = InteractionMatcher::new(vec![
            interaction("list", "GET", "/projects", &[], None),
            interaction("delete", "DELETE", "/projects", &[], None),
        ]);

        let matched = matcher.match_request(&request("DELETE", "/projects", &[], ""));
        assert_eq!(matched.map(Interaction::description), Some("delete"));
    }

    #[test]
    fn test_interactions_are_single_use() {
        let mut matcher =
            InteractionMatcher::new(vec![interaction("list", "GET", "/projects", &[], None)]);

        assert!(matcher
            .match_request(&request("GET", "/projects", &[], ""))
            .is_some());
        assert!(matcher
            .match_request(&request("GET", "/projects", &[], ""))
            .is_none());
    }

    #[test]
    fn test_first_declared_wins() {
        let mut matcher = InteractionMatcher::new(vec![
            interaction("first", "GET", "/projects", &[], None),
            interaction("second", "GET", "/projects", &[], None),
        ]);

        let first = matcher
            .match_request(&request("GET", "/projects", &[], ""))
            .map(|i| i.description().to_string());
        let second = matcher
            .match_request(&request("GET", "/projects", &[], ""))
            .map(|i| i.description().to_string());

        assert_eq!(first.as_deref(), Some("first"));
        assert_eq!(second.as_deref(), Some("second"));
    }

    #[test]
    fn test_declared_headers_should_be_present() {
        let mut matcher = InteractionMatcher::new(vec![interaction(
            "list",
            "GET",
            "/projects",
            &[("Accept", "application/json")],
            None,
        )]);

        assert!(matcher
            .match_request(&request("GET", "/projects", &[], ""))
            .is_none());
        assert!(matcher
            .match_request(&request(
                "GET",
                "/projects",
                &[("accept", "application/json"), ("host", "localhost")],
                ""
            ))
            .is_some());
    }

    #[test]
    fn test_declared_body_is_compared_as_json() {
        let mut matcher = InteractionMatcher::new(vec![interaction(
            "create",
            "POST",
            "/projects",
            &[],
            Some(json!({ "name": "Project 1", "done": false })),
        )]);

        assert!(matcher
            .match_request(&request("POST", "/projects", &[], r#"{"name":"Project 2"}"#))
            .is_none());
        assert!(matcher
            .match_request(&request(
                "POST",
                "/projects",
                &[],
                r#"{ "done": false, "name": "Project 1" }"#
            ))
            .is_some());
    }

    #[test]
    fn test_query_is_ignored_unless_declared() {
        let mut matcher = InteractionMatcher::new(vec![
            interaction("any", "GET", "/projects", &[], None),
            interaction("filtered", "GET", "/projects?done=true", &[], None),
        ]);

        let first = matcher
            .match_request(&request("GET", "/projects?done=true", &[], ""))
            .map(|i| i.description().to_string());
        let second = matcher
            .match_request(&request("GET", "/projects?done=true", &[], ""))
            .map(|i| i.description().to_string());

        assert_eq!(first.as_deref(), Some("any"));
        assert_eq!(second.as_deref(), Some("filtered"));
    }

    #[test]
    fn test_unmatched_description() {
        assert_eq!(
            InteractionMatcher::unmatched_description(&request("delete", "/projects/2", &[], "")),
            "No interaction found for DELETE /projects/2"
        );
    }
}
