//! Pipeline Tests
//!
//! Submission outcomes against an in-memory store and a scripted transport.

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use crate::config::IntakeConfig;
    use crate::domain::{ClientIntake, ErrorKind, Field, SubmitError, WebhookPayload};
    use crate::pipeline::{
        NoticeAction, NoticeLevel, SubmissionPipeline, SubmissionState, SubmitOutcome,
        WebhookResponse, WebhookTransport,
    };
    use crate::store::{KeyValueStore, MemoryStore, PendingQueue, RecentClients};

    const ENDPOINT: &str = "https://hooks.example.com/intake";

    /// Answers from a script (200 once the script runs out) and records every call
    #[derive(Default)]
    struct RecordingTransport {
        script: RefCell<VecDeque<Result<WebhookResponse, String>>>,
        calls: RefCell<Vec<(String, WebhookPayload)>>,
    }

    impl RecordingTransport {
        fn scripted(responses: Vec<Result<WebhookResponse, String>>) -> Self {
            Self {
                script: RefCell::new(responses.into()),
                calls: RefCell::default(),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl WebhookTransport for RecordingTransport {
        async fn post_json(
            &self,
            endpoint: &str,
            payload: &WebhookPayload,
        ) -> Result<WebhookResponse, String> {
            self.calls
                .borrow_mut()
                .push((endpoint.to_string(), payload.clone()));
            // Give a concurrent caller the chance to run while "in flight"
            tokio::task::yield_now().await;
            self.script
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(status(200)))
        }
    }

    fn status(code: u16) -> WebhookResponse {
        WebhookResponse {
            status: code,
            reason: match code {
                200 => "OK",
                500 => "Internal Server Error",
                _ => "",
            }
            .to_string(),
        }
    }

    fn configured() -> IntakeConfig {
        IntakeConfig {
            webhook_url: Some(ENDPOINT.to_string()),
            ..Default::default()
        }
    }

    fn pipeline_with(
        transport: RecordingTransport,
        config: IntakeConfig,
    ) -> SubmissionPipeline<MemoryStore, RecordingTransport> {
        SubmissionPipeline::new(MemoryStore::new(), transport, config)
    }

    fn john() -> ClientIntake {
        ClientIntake {
            name: "john smith".to_string(),
            email: "JOHN@X.COM".to_string(),
            phone: "5551234567".to_string(),
            service_type: "Personal Tax Return".to_string(),
            source: "Walk-In".to_string(),
            ..Default::default()
        }
    }

    fn named(n: usize) -> ClientIntake {
        ClientIntake {
            name: format!("client {n}"),
            email: format!("client{n}@example.com"),
            ..john()
        }
    }

    #[tokio::test]
    async fn test_success_normalizes_payload() {
        let pipeline = pipeline_with(RecordingTransport::default(), configured());
        let at = Utc.with_ymd_and_hms(2026, 4, 10, 14, 0, 0).unwrap();

        let outcome = pipeline.submit_at(&john(), at).await;

        let SubmitOutcome::Delivered { payload, recent, notice } = outcome else {
            panic!("expected delivery");
        };
        assert_eq!(payload.intake.name, "John Smith");
        assert_eq!(payload.intake.email, "john@x.com");
        assert_eq!(payload.intake.phone, "5551234567");
        assert_eq!(payload.timestamp, at);
        assert_eq!(payload.submitted_by, "staff_user");
        assert_eq!(payload.form_version, "staff_v1");
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.title, "John Smith added successfully");
        assert_eq!(notice.description, "Welcome email sent to john@x.com");
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].name, "John Smith");
        assert_eq!(recent[0].timestamp, at);

        let calls = pipeline.transport().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, ENDPOINT);
        assert_eq!(pipeline.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_success_persists_recent_and_leaves_queue_alone() {
        let pipeline = pipeline_with(RecordingTransport::default(), configured());
        pipeline.submit(&john()).await;

        let stored = RecentClients::load(pipeline.store());
        assert_eq!(stored.to_vec(), pipeline.recent_clients());
        assert_eq!(pipeline.pending_len(), 0);
    }

    #[tokio::test]
    async fn test_recent_list_caps_at_five_newest_first() {
        let pipeline = pipeline_with(RecordingTransport::default(), configured());
        for n in 1..=7 {
            assert!(matches!(
                pipeline.submit(&named(n)).await,
                SubmitOutcome::Delivered { .. }
            ));
        }

        let names: Vec<_> = pipeline
            .recent_clients()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Client 7", "Client 6", "Client 5", "Client 4", "Client 3"]);
    }

    #[tokio::test]
    async fn test_recent_list_loaded_at_startup() {
        let first = pipeline_with(RecordingTransport::default(), configured());
        first.submit(&john()).await;
        let store = first.store().raw(crate::store::RECENT_CLIENTS_KEY).unwrap();

        let reopened = MemoryStore::new();
        reopened.set(crate::store::RECENT_CLIENTS_KEY, &store).unwrap();
        let second = SubmissionPipeline::new(reopened, RecordingTransport::default(), configured());
        assert_eq!(second.recent_clients(), first.recent_clients());
    }

    #[tokio::test]
    async fn test_missing_required_field_sends_nothing() {
        let pipeline = pipeline_with(RecordingTransport::default(), configured());
        let mut intake = john();
        intake.service_type.clear();

        let outcome = pipeline.submit(&intake).await;

        let SubmitOutcome::Rejected(errors) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(errors.message(Field::ServiceType), Some("Service type is required"));
        assert_eq!(pipeline.transport().call_count(), 0);
        assert_eq!(pipeline.pending_len(), 0);
        assert!(pipeline.recent_clients().is_empty());
    }

    #[tokio::test]
    async fn test_unset_endpoint_is_configuration_error_and_queues() {
        let pipeline = pipeline_with(RecordingTransport::default(), IntakeConfig::default());

        let outcome = pipeline.submit(&john()).await;

        let SubmitOutcome::Failed { error, notice, queued, .. } = outcome else {
            panic!("expected failure");
        };
        assert_eq!(error, SubmitError::Configuration);
        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.description.contains("Webhook URL not configured"));
        assert_eq!(queued, Some(1));
        assert_eq!(pipeline.transport().call_count(), 0);
        assert_eq!(pipeline.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_server_error_queues_and_retry_resends_identical_payload() {
        let transport = RecordingTransport::scripted(vec![Ok(status(500)), Ok(status(200))]);
        let pipeline = pipeline_with(transport, configured());

        let outcome = pipeline.submit(&john()).await;
        let SubmitOutcome::Failed { payload, error, notice, queued } = outcome else {
            panic!("expected failure");
        };
        assert_eq!(
            error,
            SubmitError::Status {
                status: 500,
                reason: "Internal Server Error".to_string()
            }
        );
        assert_eq!(error.kind(), ErrorKind::Transport);
        assert_eq!(notice.action, Some(NoticeAction::Retry));
        assert_eq!(notice.description, "Webhook returned 500: Internal Server Error");
        assert_eq!(queued, Some(1));
        assert!(pipeline.recent_clients().is_empty());

        let retried = pipeline.retry(payload.clone()).await;
        assert!(matches!(retried, SubmitOutcome::Delivered { .. }));

        let calls = pipeline.transport().calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1, calls[1].1);
        assert_eq!(calls[1].1, payload);
    }

    #[tokio::test]
    async fn test_network_failure_keeps_recent_and_appends_one_pending() {
        let transport = RecordingTransport::scripted(vec![
            Ok(status(200)),
            Err("connection refused".to_string()),
        ]);
        let pipeline = pipeline_with(transport, configured());
        pipeline.submit(&named(1)).await;
        let before = pipeline.recent_clients();

        let outcome = pipeline.submit(&named(2)).await;

        let SubmitOutcome::Failed { error, .. } = outcome else {
            panic!("expected failure");
        };
        assert_eq!(error, SubmitError::Network("connection refused".to_string()));
        assert_eq!(pipeline.recent_clients(), before);
        let pending = pipeline.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].intake.name, "Client 2");
    }

    #[tokio::test]
    async fn test_overlapping_submit_is_busy() {
        let pipeline = pipeline_with(RecordingTransport::default(), configured());
        let intake = john();

        let (a, b) = tokio::join!(pipeline.submit(&intake), pipeline.submit(&intake));

        let outcomes = [a, b];
        let delivered = outcomes
            .iter()
            .filter(|o| matches!(o, SubmitOutcome::Delivered { .. }))
            .count();
        let busy = outcomes
            .iter()
            .filter(|o| matches!(o, SubmitOutcome::Busy))
            .count();
        assert_eq!((delivered, busy), (1, 1));
        assert_eq!(pipeline.transport().call_count(), 1);
        assert_eq!(pipeline.recent_clients().len(), 1);
        assert_eq!(pipeline.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_store_write_failure_does_not_fail_delivery() {
        let pipeline = pipeline_with(RecordingTransport::default(), configured());
        pipeline.store().fail_writes(true);

        let outcome = pipeline.submit(&john()).await;

        assert!(matches!(outcome, SubmitOutcome::Delivered { .. }));
        assert_eq!(pipeline.recent_clients().len(), 1);
    }

    #[tokio::test]
    async fn test_replay_delivers_queue_and_keeps_failures() {
        let transport = RecordingTransport::scripted(vec![
            Ok(status(503)),
            Ok(status(503)),
            // replay: first delivered, second fails again
            Ok(status(200)),
            Ok(status(500)),
        ]);
        let pipeline = pipeline_with(transport, configured());
        pipeline.submit(&named(1)).await;
        pipeline.submit(&named(2)).await;
        assert_eq!(pipeline.pending_len(), 2);

        let report = pipeline.replay_pending().await.expect("not busy");

        assert_eq!(report.delivered, 1);
        assert_eq!(report.remaining, 1);
        assert_eq!(
            report.last_error.as_deref(),
            Some("Webhook returned 500: Internal Server Error")
        );
        let pending = pipeline.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].intake.name, "Client 2");
        assert_eq!(pipeline.recent_clients()[0].name, "Client 1");
        assert_eq!(pipeline.transport().call_count(), 4);
    }

    #[tokio::test]
    async fn test_replay_without_endpoint_stops_early() {
        let pipeline = pipeline_with(RecordingTransport::default(), IntakeConfig::default());
        pipeline.submit(&named(1)).await;
        pipeline.submit(&named(2)).await;

        let report = pipeline.replay_pending().await.expect("not busy");

        assert_eq!(report.delivered, 0);
        assert_eq!(report.remaining, 2);
        assert_eq!(PendingQueue::len(pipeline.store()), 2);
        assert_eq!(pipeline.transport().call_count(), 0);
    }

    #[tokio::test]
    async fn test_clear_pending() {
        let pipeline = pipeline_with(RecordingTransport::default(), IntakeConfig::default());
        pipeline.submit(&john()).await;
        pipeline.clear_pending().unwrap();
        assert!(pipeline.pending().is_empty());
    }

    #[tokio::test]
    async fn test_configure_applies_to_next_submit() {
        let pipeline = pipeline_with(RecordingTransport::default(), IntakeConfig::default());
        pipeline.configure(configured());
        assert!(matches!(
            pipeline.submit(&john()).await,
            SubmitOutcome::Delivered { .. }
        ));
    }

    #[tokio::test]
    async fn test_successful_retry_settles_queue_so_replay_sends_nothing() {
        let transport = RecordingTransport::scripted(vec![Ok(status(500)), Ok(status(200))]);
        let pipeline = pipeline_with(transport, configured());

        let SubmitOutcome::Failed { payload, .. } = pipeline.submit(&john()).await else {
            panic!("expected failure");
        };
        assert_eq!(pipeline.pending_len(), 1);

        let retried = pipeline.retry(payload).await;
        assert!(matches!(retried, SubmitOutcome::Delivered { .. }));
        assert_eq!(pipeline.pending_len(), 0);

        let report = pipeline.replay_pending().await.expect("not busy");
        assert_eq!(report.delivered, 0);
        assert_eq!(pipeline.transport().call_count(), 2);
        let names: Vec<_> = pipeline.recent_clients().into_iter().map(|c| c.name).collect();
        assert_eq!(names, ["John Smith"]);
    }

    #[tokio::test]
    async fn test_successful_retry_settles_every_failed_attempt_of_that_payload() {
        let transport = RecordingTransport::scripted(vec![
            Ok(status(500)),
            Ok(status(503)),
            Ok(status(500)),
            Ok(status(200)),
        ]);
        let pipeline = pipeline_with(transport, configured());
        pipeline.submit(&named(1)).await;

        let SubmitOutcome::Failed { payload, .. } = pipeline.submit(&named(2)).await else {
            panic!("expected failure");
        };
        assert!(matches!(
            pipeline.retry(payload.clone()).await,
            SubmitOutcome::Failed { queued: Some(3), .. }
        ));
        assert!(matches!(
            pipeline.retry(payload).await,
            SubmitOutcome::Delivered { .. }
        ));

        let pending = pipeline.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].intake.name, "Client 1");
    }

    #[tokio::test]
    async fn test_retry_during_submission_is_busy_and_keeps_queue() {
        let transport = RecordingTransport::scripted(vec![Ok(status(500))]);
        let pipeline = pipeline_with(transport, configured());
        let SubmitOutcome::Failed { payload, .. } = pipeline.submit(&named(1)).await else {
            panic!("expected failure");
        };

        let intake = named(2);
        let (submitted, retried) =
            tokio::join!(pipeline.submit(&intake), pipeline.retry(payload));

        assert!(matches!(submitted, SubmitOutcome::Delivered { .. }));
        assert_eq!(retried, SubmitOutcome::Busy);
        assert_eq!(pipeline.transport().call_count(), 2);
        let pending = pipeline.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].intake.name, "Client 1");
    }
}
