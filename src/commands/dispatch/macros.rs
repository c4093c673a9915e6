//! Macros for command timing and logging

/// Trace command phase timing when running verbose
///
/// Usage:
/// ```ignore
/// trace_command!(ctx.cli, ctx.start, "pool_all");
/// ```
macro_rules! trace_command {
    ($cli:expr, $start:expr, $label:expr) => {
        if $cli.verbose {
            ::tracing::debug!(elapsed = ?$start.elapsed(), $label);
        }
    };
}

pub(crate) use trace_command;
