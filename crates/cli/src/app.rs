//! Startup wiring: flags and environment in, a running session out.

use std::io::{BufRead, Write};

use haversack_inventory::{FsDocumentSource, Inventory, ItemParser, load};

use crate::args::StartupConfig;
use crate::config::AppConfig;
use crate::log_writer::writer_for;
use crate::render;
use crate::session::Session;

/// Build the inventory, load the requested documents and run the menu.
///
/// Returns the inventory as it was when the session ended.
pub fn run<R, W>(
    config: &AppConfig,
    startup: StartupConfig,
    input: R,
    mut out: W,
) -> anyhow::Result<Inventory>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "DND Inventory app")?;
    writeln!(out)?;
    for token in &startup.ignored {
        writeln!(out, "Unknown argument `{token}` is ignored.")?;
    }

    let mut inventory = Inventory::new(startup.max_weight, startup.money);
    render::weight_left(&mut out, &inventory)?;
    render::money(&mut out, &inventory)?;
    writeln!(out)?;

    let source = FsDocumentSource::new(&config.items_dir, config.max_document_bytes);
    tracing::debug!(
        items_dir = %source.root().display(),
        max_document_bytes = source.max_bytes(),
        requested = startup.requested_copies(),
        "loading item documents"
    );
    let report = load(
        &source,
        &startup.requests,
        &mut inventory,
        config.scan_limits(),
    );
    render::load_report(&mut out, &report)?;

    tracing::info!(
        clean = report.is_clean(),
        max_weight = startup.max_weight,
        money = %startup.money,
        items = inventory.item_count(),
        "inventory ready"
    );

    let log = writer_for(startup.camp_log.as_deref());
    let mut session = Session::new(
        inventory,
        source,
        ItemParser::new(config.scan_limits()),
        log,
        input,
        out,
    );
    session.run()?;

    let (inventory, _, _) = session.into_parts();
    Ok(inventory)
}
