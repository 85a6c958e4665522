use gdc_deploy_cloud::GcloudError;
use std::process::ExitCode;

/// Shell convention for "command not found".
const NOT_FOUND: u8 = 127;

/// Shell convention for "found but not executable".
const NOT_EXECUTABLE: u8 = 126;

/// Print `err` (unless gcloud already did) and pick the process exit code.
///
/// A gcloud failure keeps gcloud's own exit code. When gcloud streamed its
/// output to the terminal nothing further is printed.
pub fn report(err: &anyhow::Error) -> ExitCode {
    let gcloud = err.chain().find_map(|e| e.downcast_ref::<GcloudError>());

    match gcloud {
        Some(g @ GcloudError::CommandFailed { stderr, .. }) => {
            if !stderr.is_empty() {
                eprintln!("Error: {err:#}");
            }
            let code = g.exit_code();
            tracing::debug!(?code, "gcloud failed");
            match passthrough(code) {
                Some(c) => ExitCode::from(c),
                None => ExitCode::FAILURE,
            }
        }
        Some(GcloudError::NotFound { .. }) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(NOT_FOUND)
        }
        Some(GcloudError::Spawn { .. }) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(NOT_EXECUTABLE)
        }
        _ => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// gcloud's exit code, if it fits a process exit status and means failure.
fn passthrough(code: Option<i32>) -> Option<u8> {
    code.and_then(|c| {
        // arch-lint: allow(no-silent-result-drop) reason="out of range means generic failure"
        u8::try_from(c).ok()
    })
    .filter(|c| *c != 0)
}
