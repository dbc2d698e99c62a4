#[cfg(test)]
mod tests {
    use futures::future;
    use pact_dsl::{pact_test, ConfigurationError, Error, Pact};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn expected_body() -> Value {
        json!([{
            "id": 1,
            "name": "Project 1",
            "due": "2016-02-11T09:46:56.023Z",
            "tasks": [
                { "id": 1, "name": "Do the laundry", "done": true },
                { "id": 2, "name": "Do the dishes", "done": false },
                { "id": 3, "name": "Do the backyard", "done": false },
                { "id": 4, "name": "Do nothing", "done": false }
            ]
        }])
    }

    fn declare_projects(pact: &mut Pact) {
        pact.interaction()
            .given("i have a list of projects")
            .upon_receiving("a request for projects")
            .with_request("get", "/projects", None, &[("Accept", "application/json")])
            .will_respond_with(
                200,
                &[("Content-Type", "application/json")],
                Some(expected_body()),
            )
            .unwrap();
    }

    #[pact_test("Test DSL", "Projects")]
    async fn single_request_verifies(pact: &mut Pact) {
        declare_projects(pact);

        let client = reqwest::Client::new();
        let url = format!("{}/projects", pact.url().unwrap());

        let responses = pact
            .verify(|| client.get(&url).header("Accept", "application/json").send())
            .await
            .unwrap();

        assert_eq!(responses.len(), 1);
        assert_eq!(
            serde_json::from_str::<Value>(&responses[0]).unwrap(),
            expected_body()
        );
    }

    #[pact_test("Test DSL", "Projects")]
    async fn two_concurrent_requests_verify_in_issue_order(pact: &mut Pact) {
        declare_projects(pact);
        pact.interaction()
            .given("i have a list of projects")
            .upon_receiving("a request for a project that does not exist")
            .with_request("get", "/projects/2", None, &[("Accept", "application/json")])
            .will_respond_with(404, &[("Content-Type", "application/json")], None)
            .unwrap();

        let client = reqwest::Client::new();
        let base_url = pact.url().unwrap();
        let projects_url = format!("{}/projects", base_url);
        let project_url = format!("{}/projects/2", base_url);

        let responses = pact
            .verify(|| {
                future::try_join_all(vec![
                    client
                        .get(&projects_url)
                        .header("Accept", "application/json")
                        .send(),
                    client
                        .get(&project_url)
                        .header("Accept", "application/json")
                        .send(),
                ])
            })
            .await
            .unwrap();

        assert_eq!(responses.len(), 2);
        assert_eq!(
            serde_json::from_str::<Value>(&responses[0]).unwrap(),
            expected_body()
        );
        assert_eq!(responses[1], "");
    }

    #[pact_test("Test DSL", "Projects")]
    async fn unexpected_interaction_fails_verification(pact: &mut Pact) {
        declare_projects(pact);

        let client = reqwest::Client::new();
        let base_url = pact.url().unwrap();
        let projects_url = format!("{}/projects", base_url);
        let project_url = format!("{}/projects/2", base_url);

        let result = pact
            .verify(|| {
                future::try_join_all(vec![
                    client
                        .get(&projects_url)
                        .header("Accept", "application/json")
                        .send(),
                    client.delete(&project_url).send(),
                ])
            })
            .await;

        match result {
            Err(Error::Mismatch(mismatches)) => {
                assert!(mismatches[0].contains("No interaction found for DELETE /projects/2"))
            }
            other => panic!("Verification should have failed, got {:?}", other),
        }
    }

    async fn send_checked(request: reqwest::RequestBuilder) -> reqwest::Result<reqwest::Response> {
        request.send().await?.error_for_status()
    }

    #[pact_test("Test DSL", "Projects")]
    async fn unexpected_interaction_fails_verification_when_client_rejects_errors(
        pact: &mut Pact,
    ) {
        declare_projects(pact);

        let client = reqwest::Client::new();
        let base_url = pact.url().unwrap();
        let projects_url = format!("{}/projects", base_url);
        let project_url = format!("{}/projects/2", base_url);

        let result = pact
            .verify(|| {
                future::try_join(
                    send_checked(
                        client
                            .get(&projects_url)
                            .header("Accept", "application/json"),
                    ),
                    send_checked(client.delete(&project_url)),
                )
            })
            .await;

        assert_eq!(
            result.unwrap_err().mismatches(),
            Some(&["No interaction found for DELETE /projects/2".to_string()][..])
        );
    }

    #[pact_test("Test DSL", "Projects")]
    async fn tuple_of_requests_verifies(pact: &mut Pact) {
        declare_projects(pact);
        pact.interaction()
            .upon_receiving("a request to create a project")
            .with_request(
                "post",
                "/projects",
                Some(json!({ "name": "Project 2" })),
                &[("Content-Type", "application/json")],
            )
            .will_respond_with(201, &[], Some(json!({ "id": 2, "name": "Project 2" })))
            .unwrap();

        let client = reqwest::Client::new();
        let url = format!("{}/projects", pact.url().unwrap());

        let responses = pact
            .verify(|| {
                future::try_join(
                    client.get(&url).header("Accept", "application/json").send(),
                    client
                        .post(&url)
                        .header("Content-Type", "application/json")
                        .body(r#"{"name":"Project 2"}"#)
                        .send(),
                )
            })
            .await
            .unwrap();

        assert_eq!(responses[1], r#"{"id":2,"name":"Project 2"}"#);
    }

    #[pact_test("Test DSL", "Projects")]
    async fn verify_without_interactions_is_a_configuration_error(pact: &mut Pact) {
        let client = reqwest::Client::new();
        let url = format!("{}/projects", pact.url().unwrap());

        let result = pact.verify(|| client.get(&url).send()).await;

        assert!(matches!(
            result,
            Err(Error::Configuration(ConfigurationError::NoInteractions))
        ));
    }

    #[pact_test("Test DSL", "Projects")]
    async fn consecutive_verifications_are_independent(pact: &mut Pact) {
        let client = reqwest::Client::new();
        let base_url = pact.url().unwrap();
        let projects_url = format!("{}/projects", base_url);
        let project_url = format!("{}/projects/2", base_url);

        declare_projects(pact);
        pact.verify(|| {
            client
                .get(&projects_url)
                .header("Accept", "application/json")
                .send()
        })
        .await
        .unwrap();

        pact.interaction()
            .upon_receiving("a request for a project that does not exist")
            .with_request("get", "/projects/2", None, &[])
            .will_respond_with(404, &[], None)
            .unwrap();

        let result = pact
            .verify(|| {
                future::try_join_all(vec![
                    client.get(&project_url).send(),
                    client
                        .get(&projects_url)
                        .header("Accept", "application/json")
                        .send(),
                ])
            })
            .await;

        assert_eq!(
            result.unwrap_err().mismatches(),
            Some(&["No interaction found for GET /projects".to_string()][..])
        );
    }
}
