// ###################################
// ->   Error format chain
// ###################################
/// Calls `Error::source()` on a chain of errors and tries to write them to a `Formatter`.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current_src = e.source();
    while let Some(cause) = current_src {
        write!(f, "Caused by:\n\t{cause}")?;
        current_src = cause.source();
    }

    Ok(())
}

/// Flattens an error and its sources into a single line: `outer: inner: innermost`.
pub fn error_chain_string(e: &(dyn std::error::Error + 'static)) -> String {
    let mut out = e.to_string();
    let mut current_src = e.source();
    while let Some(cause) = current_src {
        let msg = cause.to_string();
        // reqwest and hyper often repeat the inner message in the outer one
        if !out.ends_with(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        current_src = cause.source();
    }

    out
}
