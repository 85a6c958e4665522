use super::TargetArgs;
use gdc_deploy_cloud::GcloudClient;

pub async fn status(target_args: &TargetArgs) -> anyhow::Result<()> {
    let target = target_args.resolve()?;

    let client = GcloudClient::new();
    let url = client.describe_service(&target).await?;

    if url.is_empty() {
        println!("{target}: no URL assigned");
    } else {
        println!("{url}");
    }
    Ok(())
}
