//! Operation pipelines against an in-memory provider and executor

#![allow(clippy::unwrap_used, clippy::panic)]

use stackrun_core::{
    CommandExecutor, DistributionDescriptor, Output, RawOutput, StackDescription, StackProvider,
};
use stackrun_engine::{
    CommandOutcome, Deployment, Error, OperationTable, Outcome, Settings, StackNaming, Target,
    operations,
};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

const BUCKET_KEY: &str = "WebAppS3BucketOutput";
const DOMAIN_KEY: &str = "WebAppCloudFrontDistributionOutput";

struct FakeProvider {
    outputs: Vec<Output>,
    distributions: Vec<DistributionDescriptor>,
    fail_describe: bool,
    fail_list: bool,
    describes: Cell<usize>,
}

impl FakeProvider {
    fn new(outputs: Vec<Output>, distributions: Vec<DistributionDescriptor>) -> Self {
        Self {
            outputs,
            distributions,
            fail_describe: false,
            fail_list: false,
            describes: Cell::new(0),
        }
    }

    fn deployed() -> Self {
        Self::new(
            vec![
                Output::new(BUCKET_KEY, "shop-prod-bucket"),
                Output::new(DOMAIN_KEY, "d1.example.com"),
            ],
            vec![
                DistributionDescriptor::new("E999", "other.com"),
                DistributionDescriptor::new("E123", "d1.example.com"),
            ],
        )
    }
}

impl StackProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn describe_stack(
        &self,
        stack_name: &str,
        _stage: &str,
        _region: &str,
    ) -> stackrun_core::Result<StackDescription> {
        self.describes.set(self.describes.get() + 1);
        if self.fail_describe {
            return Err(stackrun_core::Error::Provider {
                provider: "fake".to_string(),
                message: "ExpiredToken".to_string(),
            });
        }
        Ok(StackDescription::new(stack_name, self.outputs.clone()))
    }

    fn list_distributions(
        &self,
        _stage: &str,
        _region: &str,
    ) -> stackrun_core::Result<Vec<DistributionDescriptor>> {
        if self.fail_list {
            return Err(stackrun_core::Error::Provider {
                provider: "fake".to_string(),
                message: "Throttling".to_string(),
            });
        }
        Ok(self.distributions.clone())
    }
}

#[derive(Default)]
struct RecordingExecutor {
    stderr: String,
    calls: RefCell<Vec<Vec<String>>>,
}

impl RecordingExecutor {
    fn failing(stderr: &str) -> Self {
        Self {
            stderr: stderr.to_string(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&self, program: &str, args: &[String]) -> stackrun_core::Result<RawOutput> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().cloned());
        self.calls.borrow_mut().push(call);
        Ok(RawOutput {
            stdout: Vec::new(),
            stderr: self.stderr.as_bytes().to_vec(),
            exit_code: Some(0),
        })
    }
}

fn settings() -> Settings {
    Settings {
        local_path: PathBuf::from("/srv/shop/app"),
        ..Settings::default()
    }
}

fn deployment<'a>(
    provider: &'a FakeProvider,
    executor: &'a RecordingExecutor,
    profile: Option<&str>,
) -> Deployment<'a> {
    Deployment::new(
        provider,
        executor,
        StackNaming::Service("shop".to_string()),
        "aws",
        Target {
            stage: "prod".to_string(),
            region: "us-east-1".to_string(),
            profile: profile.map(str::to_string),
        },
        settings(),
    )
}

fn words(line: &str) -> Vec<String> {
    line.split(' ').map(str::to_string).collect()
}

#[test]
fn test_sync_targets_resolved_bucket() {
    let provider = FakeProvider::deployed();
    let executor = RecordingExecutor::default();
    let deployment = deployment(&provider, &executor, None);

    let outcome = operations::sync(&deployment).unwrap();

    assert!(outcome.is_success());
    assert_eq!(
        executor.calls(),
        [words(
            "aws --region us-east-1 s3 sync /srv/shop/app s3://shop-prod-bucket/"
        )]
    );
}

#[test]
fn test_profile_follows_region() {
    let provider = FakeProvider::deployed();
    let executor = RecordingExecutor::default();
    let deployment = deployment(&provider, &executor, Some("ci"));

    operations::empty(&deployment).unwrap();

    assert_eq!(
        executor.calls(),
        [words(
            "aws --region us-east-1 --profile ci s3 rm s3://shop-prod-bucket/ --recursive"
        )]
    );
}

#[test]
fn test_sync_with_missing_bucket_runs_nothing() {
    let provider = FakeProvider::new(Vec::new(), Vec::new());
    let executor = RecordingExecutor::default();
    let deployment = deployment(&provider, &executor, None);

    let outcome = operations::sync(&deployment).unwrap();

    assert_eq!(
        outcome,
        CommandOutcome::Skipped {
            missing_output: BUCKET_KEY.to_string()
        }
    );
    assert!(executor.calls().is_empty());
}

#[test]
fn test_sync_stderr_is_logged_not_raised() {
    let provider = FakeProvider::deployed();
    let executor = RecordingExecutor::failing("upload failed: AccessDenied\n");
    let deployment = deployment(&provider, &executor, None);

    let outcome = OperationTable.dispatch("syncToS3", &deployment).unwrap();

    let Outcome::Command(CommandOutcome::Failed(result)) = outcome else {
        panic!("expected failed command outcome");
    };
    assert_eq!(result.stderr(), "upload failed: AccessDenied\n");
}

#[test]
fn test_info_reports_not_found() {
    let provider = FakeProvider::new(vec![Output::new(DOMAIN_KEY, "d1.example.com")], Vec::new());
    let executor = RecordingExecutor::default();
    let deployment = deployment(&provider, &executor, None);

    let bucket = operations::bucket_info(&deployment).unwrap();
    assert_eq!(bucket.value, None);
    assert_eq!(bucket.to_string(), "Not Found");

    let domain = operations::domain_info(&deployment).unwrap();
    assert_eq!(domain.value.as_deref(), Some("d1.example.com"));
    assert!(executor.calls().is_empty());
}

#[test]
fn test_domain_info_reports_not_found() {
    let provider = FakeProvider::new(vec![Output::new(BUCKET_KEY, "shop-prod-bucket")], Vec::new());
    let executor = RecordingExecutor::default();
    let deployment = deployment(&provider, &executor, None);

    let domain = operations::domain_info(&deployment).unwrap();
    assert_eq!(domain.key, DOMAIN_KEY);
    assert_eq!(domain.value, None);
    assert_eq!(domain.to_string(), "Not Found");

    let outcome = OperationTable.dispatch("domainInfo", &deployment).unwrap();
    let Outcome::Info(info) = outcome else {
        panic!("expected info outcome");
    };
    assert_eq!(info.display_value(), "Not Found");
    assert!(executor.calls().is_empty());
}

#[test]
fn test_info_is_idempotent_with_fresh_queries() {
    let provider = FakeProvider::deployed();
    let executor = RecordingExecutor::default();
    let deployment = deployment(&provider, &executor, None);

    let first = operations::bucket_info(&deployment).unwrap();
    let second = operations::bucket_info(&deployment).unwrap();
    assert_eq!(first, second);
    assert_eq!(provider.describes.get(), 2);

    let first = operations::domain_info(&deployment).unwrap();
    let second = operations::domain_info(&deployment).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.value.as_deref(), Some("d1.example.com"));
    assert_eq!(provider.describes.get(), 4);
    assert!(executor.calls().is_empty());
}

#[test]
fn test_invalidation_targets_matching_distribution_only() {
    let provider = FakeProvider::deployed();
    let executor = RecordingExecutor::default();
    let deployment = deployment(&provider, &executor, None);

    let invalidation = operations::invalidate_cache(&deployment).unwrap();

    assert_eq!(invalidation.distribution_id, "E123");
    assert_eq!(invalidation.domain, "d1.example.com");
    assert_eq!(
        executor.calls(),
        [words(
            "aws --region us-east-1 cloudfront create-invalidation --distribution-id E123 --paths /*"
        )]
    );
}

#[test]
fn test_invalidation_without_match_runs_nothing() {
    let mut provider = FakeProvider::deployed();
    provider.distributions = vec![DistributionDescriptor::new("E999", "other.com")];
    let executor = RecordingExecutor::default();
    let deployment = deployment(&provider, &executor, None);

    let err = operations::invalidate_cache(&deployment).unwrap_err();

    assert!(matches!(err, Error::DistributionNotMatched { ref domain } if domain == "d1.example.com"));
    assert!(executor.calls().is_empty());
}

#[test]
fn test_invalidation_without_domain_output() {
    let provider = FakeProvider::new(
        vec![Output::new(BUCKET_KEY, "shop-prod-bucket")],
        vec![DistributionDescriptor::new("E123", "d1.example.com")],
    );
    let executor = RecordingExecutor::default();
    let deployment = deployment(&provider, &executor, None);

    let err = OperationTable
        .dispatch("invalidateCloudFrontCache", &deployment)
        .unwrap_err();

    assert!(matches!(err, Error::OutputRequired { ref key, ref stack } if key == DOMAIN_KEY && stack == "shop-prod"));
    assert!(executor.calls().is_empty());
}

#[test]
fn test_invalidation_command_failure_is_terminal() {
    let provider = FakeProvider::deployed();
    let executor = RecordingExecutor::failing("An error occurred (AccessDenied)\n");
    let deployment = deployment(&provider, &executor, None);

    let err = OperationTable
        .dispatch("invalidateCloudFrontCache", &deployment)
        .unwrap_err();

    let Error::CommandFailed { stderr, .. } = err else {
        panic!("expected CommandFailed");
    };
    assert_eq!(stderr, "An error occurred (AccessDenied)");
}

#[test]
fn test_distribution_list_failure_is_resolution_failure() {
    let mut provider = FakeProvider::deployed();
    provider.fail_list = true;
    let executor = RecordingExecutor::default();
    let deployment = deployment(&provider, &executor, None);

    let err = operations::invalidate_cache(&deployment).unwrap_err();

    assert!(matches!(err, Error::ResolutionFailed { .. }));
    assert!(err.to_string().contains("Throttling"));
    assert!(executor.calls().is_empty());
}

#[test]
fn test_best_effort_resolution_failure_is_logged() {
    let mut provider = FakeProvider::deployed();
    provider.fail_describe = true;
    let executor = RecordingExecutor::default();
    let deployment = deployment(&provider, &executor, None);

    for name in ["syncToS3", "emptyBucket", "bucketInfo", "domainInfo"] {
        let outcome = OperationTable.dispatch(name, &deployment).unwrap();
        let Outcome::Logged(message) = outcome else {
            panic!("{name}: expected logged failure");
        };
        assert!(message.contains("ExpiredToken"));
    }
    assert!(executor.calls().is_empty());
}

#[test]
fn test_publish_syncs_then_invalidates() {
    let provider = FakeProvider::deployed();
    let executor = RecordingExecutor::default();
    let deployment = deployment(&provider, &executor, None);

    let outcome = OperationTable.dispatch("publish", &deployment).unwrap();

    let Outcome::Published { sync, invalidation } = outcome else {
        panic!("expected publish outcome");
    };
    assert!(sync.unwrap().is_success());
    assert_eq!(invalidation.distribution_id, "E123");

    let calls = executor.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0][3..5], ["s3", "sync"]);
    assert_eq!(calls[1][3..5], ["cloudfront", "create-invalidation"]);
}

#[test]
fn test_sync_flags_and_custom_paths() {
    let provider = FakeProvider::deployed();
    let executor = RecordingExecutor::default();
    let deployment = Deployment::new(
        &provider,
        &executor,
        StackNaming::Explicit("legacy".to_string()),
        "aws",
        Target {
            stage: "prod".to_string(),
            region: String::new(),
            profile: None,
        },
        Settings {
            local_path: PathBuf::from("dist"),
            delete: true,
            extra_args: vec!["--exclude".to_string(), "*.map".to_string()],
            invalidation_paths: vec!["/index.html".to_string(), "/assets/*".to_string()],
            ..Settings::default()
        },
    );

    operations::publish(&deployment).unwrap();

    assert_eq!(
        executor.calls(),
        [
            words("aws s3 sync dist s3://shop-prod-bucket/ --delete --exclude *.map"),
            words(
                "aws cloudfront create-invalidation --distribution-id E123 --paths /index.html /assets/*"
            ),
        ]
    );
}

#[test]
fn test_unknown_operation() {
    let provider = FakeProvider::deployed();
    let executor = RecordingExecutor::default();
    let deployment = deployment(&provider, &executor, None);

    let err = OperationTable.dispatch("deploy", &deployment).unwrap_err();
    assert!(matches!(err, Error::UnknownOperation(ref name) if name == "deploy"));
}
