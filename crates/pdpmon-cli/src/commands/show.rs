use std::io::Write;

use pdpmon_config::SettingsBinding;
use pdpmon_ui::SettingsPanel;
use tracing::info;

use crate::cli::ShowArgs;
use crate::context::{AppContext, CliResult};
use crate::output::{render_panel, write_snapshot};

pub(crate) fn handle_show<W: Write + ?Sized>(
    ctx: &AppContext,
    args: &ShowArgs,
    out: &mut W,
) -> CliResult<()> {
    let mut store = ctx.open_store()?;
    if let Some(view) = args.view {
        store.set_view(view);
    }
    let mut panel = SettingsPanel::new(&store);
    info!(view = %panel.view(), "rendering settings panel");
    render_panel(&mut panel, &mut store, ctx.output, out)
}

pub(crate) fn handle_snapshot<W: Write + ?Sized>(ctx: &AppContext, out: &mut W) -> CliResult<()> {
    let store = ctx.open_store()?;
    write_snapshot(&store.snapshot(), ctx.output, out)
}
