//! Text shown to the user. Everything here writes to an `io::Write`.

use std::io::{self, Write};

use haversack_core::DomainError;
use haversack_inventory::{Inventory, Item, LoadAttempt, LoadOutcome, LoadReport};

pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

pub fn inventory_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Inventory help menu:")?;
    writeln!(out, "- Press H to display the inventory help menu.")?;
    writeln!(out, "- Press M to display the current money amount.")?;
    writeln!(out, "- Press W to display the carrying weight capacity left.")?;
    writeln!(out, "- Press A to display the item amount.")?;
    writeln!(out, "- Press L to display basic information of every item.")?;
    writeln!(out, "- Press I to view the items one by one.")?;
    writeln!(out, "- Press N to add a new item.")?;
    writeln!(out, "- Press C to clear the screen.")?;
    writeln!(out, "- Press Q to quit the inventory.")?;
    writeln!(out)
}

pub fn item_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Item help menu:")?;
    writeln!(out, "- Press H to display the item help menu.")?;
    writeln!(out, "- Press D to display more data about the current item.")?;
    writeln!(out, "- Press N to visit the next item.")?;
    writeln!(out, "- Press P to visit the previous item.")?;
    writeln!(out, "- Press X to delete the current item.")?;
    writeln!(out, "- Press Q to quit the item view.")?;
    writeln!(out, "- Press C to clear the screen.")?;
    writeln!(out)
}

pub fn item_basic(out: &mut impl Write, item: Option<&Item>) -> io::Result<()> {
    let Some(item) = item else {
        return writeln!(out, "List is empty.");
    };
    writeln!(out, "Index: {}", item.id_typed())?;
    writeln!(out, "Name: {}", item.display_name())?;
    writeln!(out, "Weight: {:.2}", item.weight())?;
    writeln!(out, "Cost: {}", item.cost())
}

pub fn item_details(out: &mut impl Write, item: &Item) -> io::Result<()> {
    writeln!(out, "Item url: {}", item.url().unwrap_or("-"))?;
    writeln!(
        out,
        "Equipment category: {}",
        item.equipment_category().map_or("-", |c| c.as_str())
    )?;
    if let Some(source) = item.source() {
        writeln!(out, "Document: {}", source.display())?;
    }
    Ok(())
}

pub fn item_list(out: &mut impl Write, inventory: &Inventory) -> io::Result<()> {
    if inventory.is_empty() {
        return writeln!(out, "List is empty.");
    }
    for item in inventory.items().iter() {
        item_basic(out, Some(item))?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn item_count(out: &mut impl Write, inventory: &Inventory) -> io::Result<()> {
    writeln!(out, "Total item amount: {}", inventory.item_count())
}

pub fn money(out: &mut impl Write, inventory: &Inventory) -> io::Result<()> {
    writeln!(out, "Money amount: {}", inventory.money())
}

pub fn weight_left(out: &mut impl Write, inventory: &Inventory) -> io::Result<()> {
    writeln!(
        out,
        "Carrying weight left: {:.2} of {:.2}",
        inventory.weight_budget(),
        inventory.max_weight()
    )
}

/// Capacity, funds and duplicate refusals read as a decision; anything else
/// means the item itself is unusable.
pub fn rejection(out: &mut impl Write, item_id: &str, reason: &DomainError) -> io::Result<()> {
    if reason.is_rejection() {
        writeln!(out, "Item {item_id} is not included: {reason}")
    } else {
        writeln!(out, "Item {item_id} is invalid: {reason}")
    }
}

pub fn load_outcome(out: &mut impl Write, outcome: &LoadOutcome) -> io::Result<()> {
    match outcome {
        LoadOutcome::Pushed {
            item_id,
            display_name,
        } => writeln!(out, "Added item. Index: {item_id}, Name: {display_name}"),
        LoadOutcome::Rejected { item_id, reason } => rejection(out, item_id.as_str(), reason),
        LoadOutcome::Failed { error } => writeln!(out, "Item skipped: {error}"),
    }
}

pub fn load_report(out: &mut impl Write, report: &LoadReport) -> io::Result<()> {
    if report.attempts.is_empty() {
        return Ok(());
    }
    writeln!(out, "Loading {} item document(s):", report.attempts.len())?;
    for LoadAttempt {
        path,
        copy,
        outcome,
    } in &report.attempts
    {
        write!(out, "{} (copy {copy}): ", path.display())?;
        load_outcome(out, outcome)?;
    }
    writeln!(
        out,
        "{} of {} item(s) added.",
        report.pushed_count(),
        report.attempts.len()
    )?;
    writeln!(out)
}
