use anyhow::Result;

use crate::context::AppContext;
use crate::plugins::Plugin;

/// Starts `ctx` with `plugins` and runs the interactive console until the
/// user quits. The context is stopped on the way out.
pub fn run(mut ctx: AppContext, plugins: Vec<Box<dyn Plugin>>) -> Result<()> {
    let report = ctx.start(plugins);
    for err in &report.errors {
        tracing::warn!(error = %err, "start problem");
    }
    crate::tui_shell::run(ctx, report)
}
