use gdc_deploy_cloud::client::{DeployError, GcloudClient, source_deploy_args};
use gdc_deploy_cloud::executor::GcloudExecutor;
use gdc_deploy_cloud::gcloud::GcloudError;
use gdc_deploy_core::{DeployConfig, DeployTarget, Overrides};
use mockall::mock;
use proptest::prelude::*;

mock! {
    Executor {}

    impl GcloudExecutor for Executor {
        async fn exec(&self, args: &[String]) -> Result<String, GcloudError>;
        async fn exec_streaming(&self, args: &[String]) -> Result<(), GcloudError>;
    }
}

fn munich() -> DeployTarget {
    DeployConfig::default().resolve(None).unwrap()
}

fn failed(code: i32, stderr: &str) -> GcloudError {
    GcloudError::CommandFailed {
        args: vec![],
        stderr: stderr.to_owned(),
        code: Some(code),
    }
}

// ── Argument Construction ──

#[test]
fn munich_demo_args_match_script() {
    assert_eq!(
        source_deploy_args(&munich()),
        vec![
            "run",
            "deploy",
            "gdc-munich-demo",
            "--source=.",
            "--region=us-west2",
            "--project=gemini-gdc-demo",
            "--allow-unauthenticated",
        ]
    );
}

#[test]
fn frontend_args_differ_only_in_service_name() {
    let frontend = DeployConfig::default().resolve(Some("frontend")).unwrap();
    let munich_args = source_deploy_args(&munich());
    let frontend_args = source_deploy_args(&frontend);

    assert_eq!(frontend_args[2], "gdc-demo-frontend");
    let differing: Vec<usize> = (0..munich_args.len())
        .filter(|&i| munich_args[i] != frontend_args[i])
        .collect();
    assert_eq!(differing, vec![2]);
}

proptest! {
    #[test]
    fn substituting_one_field_changes_one_argument(
        field in 0usize..3,
        value in "[a-z][a-z0-9-]{0,20}",
    ) {
        let base = munich();
        let mut overrides = Overrides::default();
        match field {
            0 => overrides.project_id = Some(value.clone()),
            1 => overrides.region = Some(value.clone()),
            _ => overrides.service_name = Some(value.clone()),
        }

        let before = source_deploy_args(&base);
        let after = source_deploy_args(&base.with_overrides(&overrides));

        prop_assert_eq!(before.len(), after.len());
        let changed: Vec<usize> = (0..before.len()).filter(|&i| before[i] != after[i]).collect();
        prop_assert!(changed.len() <= 1);
        prop_assert_eq!(after.last().map(String::as_str), Some("--allow-unauthenticated"));
        prop_assert_eq!(after[3].as_str(), "--source=.");
    }
}

// ── Cloud Run Deploy Tests ──

#[tokio::test]
async fn deploy_from_source_streams_one_command() {
    let mut mock = MockExecutor::new();

    mock.expect_exec_streaming()
        .times(1)
        .withf(|args| {
            args.starts_with(&["run".to_owned(), "deploy".to_owned()])
                && args.contains(&"gdc-munich-demo".to_owned())
                && args.contains(&"--allow-unauthenticated".to_owned())
        })
        .returning(|_| Ok(()));
    mock.expect_exec().never();

    let client = GcloudClient::with_executor(mock);
    let result = client.deploy_from_source(&munich()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn deploy_from_source_keeps_exit_code() {
    let mut mock = MockExecutor::new();

    mock.expect_exec_streaming()
        .times(1)
        .returning(|_| Err(failed(3, "")));

    let client = GcloudClient::with_executor(mock);
    let err = client.deploy_from_source(&munich()).await.unwrap_err();

    assert!(matches!(err, DeployError::Deploy { .. }));
    assert_eq!(err.gcloud().exit_code(), Some(3));
}

#[tokio::test]
async fn deploy_from_source_gcloud_missing() {
    let mut mock = MockExecutor::new();

    mock.expect_exec_streaming().returning(|_| {
        Err(GcloudError::NotFound {
            program: "gcloud".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        })
    });

    let client = GcloudClient::with_executor(mock);
    let err = client.deploy_from_source(&munich()).await.unwrap_err();

    assert!(matches!(err.gcloud(), GcloudError::NotFound { .. }));
    assert_eq!(err.gcloud().exit_code(), None);
}

// ── Describe Tests ──

#[tokio::test]
async fn describe_service_returns_url() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .withf(|args| {
            args.contains(&"describe".to_owned())
                && args.contains(&"gdc-munich-demo".to_owned())
                && args.contains(&"value(status.url)".to_owned())
        })
        .returning(|_| Ok("https://gdc-munich-demo-abc123-wl.a.run.app\n".to_owned()));

    let client = GcloudClient::with_executor(mock);
    let url = client.describe_service(&munich()).await.unwrap();

    assert_eq!(url, "https://gdc-munich-demo-abc123-wl.a.run.app");
}

#[tokio::test]
async fn describe_service_failure() {
    let mut mock = MockExecutor::new();

    mock.expect_exec()
        .returning(|_| Err(failed(1, "Cannot find service")));

    let client = GcloudClient::with_executor(mock);
    let result = client.describe_service(&munich()).await;

    assert!(matches!(result, Err(DeployError::Describe { .. })));
}
