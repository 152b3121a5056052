use std::env;
use std::fs;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use cell_comments_core::{
    CellCommentsPart, CellViewModel, CommentService, DemoCommentService, PanelConfig, PanelServices,
    StaticCommentService,
};
use tracing_subscriber::EnvFilter;

/// Usage: `cell_comments_demo [config.json] [thread.json]`
///
/// Renders the discussion of one code cell to HTML on stdout and reports the
/// height the part contributes to the cell.
fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let raw = fs::read_to_string(&path).with_context(|| format!("failed to read config file at {path}"))?;
            PanelConfig::from_json(&raw).with_context(|| format!("failed to parse config file at {path}"))?
        }
        None => PanelConfig::default(),
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).without_time().with_writer(std::io::stderr).init();

    let service: Rc<dyn CommentService> = match args.next() {
        Some(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read thread file at {path}"))?;
            let service = StaticCommentService::from_json(&raw)
                .with_context(|| format!("failed to parse thread file at {path}"))?;
            Rc::new(service)
        }
        None => Rc::new(DemoCommentService),
    };

    let services = PanelServices::html(service, &config);
    let mut part = CellCommentsPart::new(config, services);
    let cell = Rc::new(CellViewModel::code(0, "vscode-notebook-cell:/demo.ipynb#cell0"));

    part.render_cell(&cell).context("failed to render comment thread")?;
    part.prepare_layout();
    tracing::info!(height = cell.comment_height(), entries = part.entries().len(), "rendered cell comments");

    println!("{}", part.to_html());
    part.dispose();
    Ok(())
}
