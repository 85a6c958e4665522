use super::TargetArgs;

/// Print every target, marking the default with `*`.
pub fn targets(target_args: &TargetArgs) -> anyhow::Result<()> {
    let config = target_args.load_config()?;

    for name in config.target_names() {
        let target = config.resolve(Some(&name))?;
        let marker = if name == config.default_target {
            '*'
        } else {
            ' '
        };
        println!("{marker} {name:<16} {target}");
    }
    Ok(())
}
