//! Interactive menu over any input/output pair.
//!
//! Commands are single characters, case-insensitive, and whitespace between
//! them is ignored, so `a m w` on one line runs three commands. End of input
//! ends the session the same way a confirmed quit does.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use chrono::Utc;

use haversack_inventory::{DocumentSource, Inventory, ItemHandle, ItemParser, load_one};

use crate::log_writer::{CampSnapshot, LogWriter};
use crate::render;

const INVALID_COMMAND: &str = "Non valid command entered.";
const INVALID_ANSWER: &str = "Non valid answer entered, please enter yes (Y) or no (N).";
const NOTHING_TO_SHOW: &str = "No items available to display.";

/// Whitespace-separated reads from a line-oriented reader.
struct Input<R> {
    reader: R,
    pending: VecDeque<char>,
}

impl<R: BufRead> Input<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next non-whitespace character; `None` once input is exhausted.
    fn next_char(&mut self) -> io::Result<Option<char>> {
        loop {
            while let Some(c) = self.pending.pop_front() {
                if !c.is_whitespace() {
                    return Ok(Some(c));
                }
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.chars());
        }
    }

    fn next_word(&mut self) -> io::Result<Option<String>> {
        let Some(first) = self.next_char()? else {
            return Ok(None);
        };
        let mut word = String::from(first);
        while let Some(&c) = self.pending.front() {
            if c.is_whitespace() {
                break;
            }
            word.push(c);
            self.pending.pop_front();
        }
        Ok(Some(word))
    }
}

enum Flow {
    Continue,
    Quit,
}

pub struct Session<R, W, S, L> {
    input: Input<R>,
    out: W,
    inventory: Inventory,
    source: S,
    parser: ItemParser,
    log: L,
}

impl<R, W, S, L> Session<R, W, S, L>
where
    R: BufRead,
    W: Write,
    S: DocumentSource,
    L: LogWriter,
{
    pub fn new(inventory: Inventory, source: S, parser: ItemParser, log: L, input: R, out: W) -> Self {
        Self {
            input: Input::new(input),
            out,
            inventory,
            source,
            parser,
            log,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_parts(self) -> (Inventory, W, L) {
        (self.inventory, self.out, self.log)
    }

    /// Run the inventory menu until the user quits or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "Inventory app start:")?;
        render::inventory_help(&mut self.out)?;
        self.out.flush()?;

        loop {
            let Some(command) = self.input.next_char().context("reading menu command")? else {
                tracing::info!("input closed, leaving the inventory");
                break;
            };
            let flow = self.inventory_command(command)?;
            self.out.flush()?;
            if let Flow::Quit = flow {
                break;
            }
        }

        self.write_camp_log()?;
        writeln!(self.out, "Quitting inventory app.")?;
        self.out.flush()?;
        Ok(())
    }

    fn inventory_command(&mut self, command: char) -> anyhow::Result<Flow> {
        tracing::debug!(%command, "inventory command");
        match command.to_ascii_lowercase() {
            'a' => render::item_count(&mut self.out, &self.inventory)?,
            'c' => write!(self.out, "{}", render::CLEAR_SCREEN)?,
            'h' => render::inventory_help(&mut self.out)?,
            'i' => self.item_view()?,
            'l' => render::item_list(&mut self.out, &self.inventory)?,
            'm' => render::money(&mut self.out, &self.inventory)?,
            'n' => self.add_item()?,
            'q' => {
                if self.confirm("Are you sure you want to quit the inventory? (N / Y)")? {
                    return Ok(Flow::Quit);
                }
                render::inventory_help(&mut self.out)?;
            }
            'w' => render::weight_left(&mut self.out, &self.inventory)?,
            _ => writeln!(self.out, "{INVALID_COMMAND}")?,
        }
        Ok(Flow::Continue)
    }

    fn add_item(&mut self) -> anyhow::Result<()> {
        writeln!(
            self.out,
            "Enter the json file name of the item to add. Example: sword.json"
        )?;
        self.out.flush()?;
        let Some(name) = self.input.next_word().context("reading item file name")? else {
            return Ok(());
        };

        let outcome = load_one(&self.source, &self.parser, Path::new(&name), &mut self.inventory);
        render::load_outcome(&mut self.out, &outcome)?;
        Ok(())
    }

    /// Browse items one at a time, starting at the first.
    fn item_view(&mut self) -> anyhow::Result<()> {
        render::item_help(&mut self.out)?;
        let mut current = self.inventory.items().first();
        self.show(current)?;

        loop {
            self.out.flush()?;
            let Some(command) = self.input.next_char().context("reading item command")? else {
                return Ok(());
            };
            tracing::debug!(%command, "item view command");

            match command.to_ascii_lowercase() {
                'c' => write!(self.out, "{}", render::CLEAR_SCREEN)?,
                'd' => match current.and_then(|h| self.inventory.items().get(h)) {
                    Some(item) => render::item_details(&mut self.out, item)?,
                    None => writeln!(self.out, "{NOTHING_TO_SHOW}")?,
                },
                'h' => render::item_help(&mut self.out)?,
                'n' | 'p' => match current {
                    Some(handle) => {
                        let items = self.inventory.items();
                        current = if command.eq_ignore_ascii_case(&'n') {
                            items.next(handle)
                        } else {
                            items.prev(handle)
                        };
                        self.show(current)?;
                    }
                    None => writeln!(self.out, "{NOTHING_TO_SHOW}")?,
                },
                'q' => {
                    writeln!(self.out, "Quitting item view.")?;
                    render::inventory_help(&mut self.out)?;
                    return Ok(());
                }
                'x' => match current {
                    Some(handle) => current = self.delete(handle)?,
                    None => writeln!(self.out, "No items available to delete.")?,
                },
                _ => writeln!(self.out, "{INVALID_COMMAND}")?,
            }
        }
    }

    /// Ask before popping the item at `handle`; returns the item to show next.
    fn delete(&mut self, handle: ItemHandle) -> anyhow::Result<Option<ItemHandle>> {
        if !self.confirm("Are you sure you want to delete this item? (N / Y)")? {
            self.show(Some(handle))?;
            return Ok(Some(handle));
        }

        let items = self.inventory.items();
        let previous = items.prev(handle);
        let Some(id) = items.get(handle).map(|item| item.id_typed().clone()) else {
            writeln!(self.out, "List is empty.")?;
            return Ok(None);
        };

        let next = match self.inventory.pop(&id) {
            Ok(item) => {
                writeln!(
                    self.out,
                    "Removed {}. Refunded {:.2} weight and {}.",
                    item.id_typed(),
                    item.weight(),
                    item.cost()
                )?;
                if self.inventory.is_empty() { None } else { previous }
            }
            Err(err) => {
                writeln!(self.out, "Could not remove {id}: {err}")?;
                Some(handle)
            }
        };
        self.show(next)?;
        Ok(next)
    }

    fn confirm(&mut self, question: &str) -> anyhow::Result<bool> {
        loop {
            writeln!(self.out, "{question}")?;
            self.out.flush()?;
            let Some(answer) = self.input.next_char().context("reading confirmation")? else {
                return Ok(false);
            };
            match answer.to_ascii_lowercase() {
                'y' => return Ok(true),
                'n' => return Ok(false),
                _ => writeln!(self.out, "{INVALID_ANSWER}")?,
            }
        }
    }

    fn show(&mut self, handle: Option<ItemHandle>) -> io::Result<()> {
        let item = handle.and_then(|h| self.inventory.items().get(h));
        render::item_basic(&mut self.out, item)
    }

    fn write_camp_log(&mut self) -> io::Result<()> {
        let snapshot = CampSnapshot::capture(&self.inventory, Utc::now());
        if let Err(err) = self.log.write_snapshot(&snapshot) {
            tracing::error!(error = %err, "camp log not written");
            writeln!(self.out, "Camp log not written: {err}")?;
        }
        Ok(())
    }
}
