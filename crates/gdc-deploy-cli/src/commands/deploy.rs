use super::TargetArgs;
use gdc_deploy_cloud::{GcloudClient, RealExecutor, source_deploy_args};

/// Deploy the current directory, or print the command with `dry_run`.
pub async fn deploy(target_args: &TargetArgs, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let target = target_args.resolve()?;
    let executor = RealExecutor::from_env();

    if dry_run {
        let args = source_deploy_args(&target);
        if json {
            let plan = serde_json::json!({
                "program": executor.program(),
                "args": args,
            });
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            let words = std::iter::once(executor.program())
                .chain(args.iter().map(String::as_str));
            let line = shlex::try_join(words)
                .map_err(|e| anyhow::anyhow!("cannot quote command line: {e}"))?;
            println!("{line}");
        }
        return Ok(());
    }

    let client = GcloudClient::with_executor(executor);
    client.deploy_from_source(&target).await?;

    tracing::info!(%target, "deployed");
    Ok(())
}
