/// Writes the error followed by every underlying `source`,
/// so a single log line carries the full error chain.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    write!(f, "{e}")?;
    let mut current = e.source();
    while let Some(cause) = current {
        write!(f, " Caused by: {cause}")?;
        current = cause.source();
    }
    Ok(())
}

/// Resolves `relative` under `base_url`, keeping any path prefix of the base
/// (`https://host/portfolio` + `api/send` -> `https://host/portfolio/api/send`).
pub fn endpoint_url(base_url: &str, relative: &str) -> Result<reqwest::Url, anyhow::Error> {
    let mut base = reqwest::Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(relative.trim_start_matches('/'))?)
}
