//! HTTP session integration tests
//!
//! Runs `HttpQuerySession` and the reachability probe against a local mock
//! server.

#[cfg(test)]
mod tests {
    use crate::common::{orchestrator, record};
    use certcheck::config::QueryConfig;
    use certcheck::core::{
        HttpQuerySession, Interrupt, LogObserver, QuerySession, RawStatus, SessionError,
        StatusCode,
    };
    use certcheck::utils::net::{build_client, probe};
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ID: &str = "130123199001011234";

    fn config(server: &MockServer) -> QueryConfig {
        QueryConfig {
            endpoint: format!("{}/lookup", server.uri()),
            present_marker: Some("待认证".to_string()),
            timeout_secs: 1,
            ..QueryConfig::default()
        }
    }

    async fn respond(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/lookup"))
            .and(query_param("idcard", ID))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_absent_marker_is_absent() {
        let server = MockServer::start().await;
        respond(
            &server,
            ResponseTemplate::new(200).set_body_string("<div class=\"empty\">暂无数据</div>"),
        )
        .await;

        let mut session = HttpQuerySession::new(&config(&server)).unwrap();
        assert_eq!(session.query(ID).await, Ok(RawStatus::Absent));
    }

    #[tokio::test]
    async fn test_present_marker_is_present() {
        let server = MockServer::start().await;
        respond(
            &server,
            ResponseTemplate::new(200).set_body_string("<td>2024</td><td>待认证</td>"),
        )
        .await;

        let mut session = HttpQuerySession::new(&config(&server)).unwrap();
        assert_eq!(session.query(ID).await, Ok(RawStatus::Present));
    }

    #[tokio::test]
    async fn test_unrecognized_page_is_ambiguous() {
        let server = MockServer::start().await;
        respond(
            &server,
            ResponseTemplate::new(200).set_body_string("<html>system maintenance</html>"),
        )
        .await;

        let mut session = HttpQuerySession::new(&config(&server)).unwrap();
        assert_eq!(session.query(ID).await, Ok(RawStatus::Ambiguous));
    }

    #[tokio::test]
    async fn test_client_error_is_rejected() {
        let server = MockServer::start().await;
        respond(&server, ResponseTemplate::new(400)).await;

        let mut session = HttpQuerySession::new(&config(&server)).unwrap();
        let err = session.query(ID).await.unwrap_err();
        assert!(matches!(err, SessionError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_slow_response_is_timeout() {
        let server = MockServer::start().await;
        respond(
            &server,
            ResponseTemplate::new(200)
                .set_body_string("暂无数据")
                .set_delay(Duration::from_secs(3)),
        )
        .await;

        let mut session = HttpQuerySession::new(&config(&server)).unwrap();
        let err = session.query(ID).await.unwrap_err();
        assert!(matches!(err, SessionError::Timeout(_)));
    }

    /// A 503 followed by a normal page resolves on the second attempt
    #[tokio::test]
    async fn test_server_error_retried_through_orchestrator() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/lookup"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        respond(&server, ResponseTemplate::new(200).set_body_string("暂无数据")).await;

        let session = HttpQuerySession::new(&config(&server)).unwrap();
        let run = orchestrator(3, Interrupt::new())
            .run(vec![record("Zhang San", ID)], session, &mut LogObserver)
            .await;

        assert_eq!(run.results[0].status, StatusCode::Certified);
        assert_eq!(run.results[0].attempts, 2);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    /// A 403 is retried until the attempt budget runs out
    #[tokio::test]
    async fn test_forbidden_retried_through_orchestrator() {
        let server = MockServer::start().await;
        respond(&server, ResponseTemplate::new(403)).await;

        let session = HttpQuerySession::new(&config(&server)).unwrap();
        let run = orchestrator(3, Interrupt::new())
            .run(vec![record("Zhang San", ID)], session, &mut LogObserver)
            .await;

        assert_eq!(run.results[0].status, StatusCode::Failed);
        assert_eq!(run.results[0].attempts, 3);
        assert_eq!(server.received_requests().await.unwrap().len(), 3);
        assert!(run.results[0].last_error.as_deref().unwrap().contains("403"));
    }

    #[tokio::test]
    async fn test_probe_reports_reachability() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/up"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = build_client("certcheck-test", Duration::from_secs(2), None).unwrap();
        assert!(probe(&client, &format!("{}/up", server.uri())).await);
        assert!(!probe(&client, &format!("{}/down", server.uri())).await);
    }
}
