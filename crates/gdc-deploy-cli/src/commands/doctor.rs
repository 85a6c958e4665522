use super::TargetArgs;
use gdc_deploy_cloud::GcloudClient;

/// Report whether the target could be deployed from source right now.
pub async fn doctor(target_args: &TargetArgs) -> anyhow::Result<()> {
    let target = target_args.resolve()?;

    let readiness = GcloudClient::new().readiness(&target).await;

    println!("Target: {target}");
    println!();
    print!("{readiness}");

    let blocked = readiness.blocked().count();
    if blocked > 0 {
        anyhow::bail!("{blocked} check(s) failed; see above for details");
    }
    Ok(())
}
