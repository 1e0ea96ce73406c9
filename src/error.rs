#[derive(thiserror::Error)]
pub enum FirebaseError {
    /// Firestore answered, but not with the status we expected. The body is
    /// kept verbatim since it usually explains what went wrong (for example
    /// a `PERMISSION_DENIED` when the database is not in test mode).
    #[error("HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl std::fmt::Debug for FirebaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

// Taken from https://www.lpalmieri.com/posts/error-handling-rust/#internal-errors
fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
