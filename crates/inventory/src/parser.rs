//! Single-pass scanner for item documents.
//!
//! Item documents are JSON, but only a handful of fields matter: the
//! top-level `index`, `name`, `weight` and `url`, the `cost` object's
//! `quantity`/`unit`, and the `equipment_category` object's `index`. The
//! scanner walks the text once, keeps a small container stack to know which
//! object it is in, and "arms" a field slot when the matching key goes by.
//! A value is consumed by the first armed slot that is still unset, so a
//! document with several plausible matches always resolves the same way.
//! `url` is the exception: every armed `url` value overwrites the previous
//! one, so the last one in the document wins.

use std::str::FromStr;

use thiserror::Error;

use haversack_core::{CategoryId, Denomination, ItemId, Money};

use crate::item::{Item, ItemDraft};

/// Longest accepted value for a captured field, in characters.
pub const DEFAULT_MAX_FIELD_LEN: usize = 49;

/// Item fields the scanner extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    DisplayName,
    Weight,
    CoinQuantity,
    CoinUnit,
    EquipmentCategory,
    Url,
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Field::Id => "index",
            Field::DisplayName => "name",
            Field::Weight => "weight",
            Field::CoinQuantity => "cost.quantity",
            Field::CoinUnit => "cost.unit",
            Field::EquipmentCategory => "equipment_category.index",
            Field::Url => "url",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("document is empty")]
    Empty,

    #[error("expected `{{` at offset {offset}, found `{found}`")]
    ExpectedObject { offset: usize, found: char },

    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    #[error("unexpected `{found}` at offset {offset}")]
    UnexpectedDelimiter { offset: usize, found: char },

    #[error("document ends inside an open object or array")]
    UnexpectedEnd,

    #[error("unexpected content after the document at offset {offset}")]
    TrailingContent { offset: usize },

    #[error("`{field}` value is {len} characters long, the limit is {max}")]
    FieldTooLong { field: Field, len: usize, max: usize },

    #[error("invalid number `{literal}` for `{field}`")]
    InvalidNumber { field: Field, literal: String },

    #[error("unknown coin unit `{0}` (expected gp, sp or cp)")]
    UnknownUnit(String),

    #[error("weight must not be negative, got {0}")]
    NegativeWeight(f64),

    #[error("document has no top-level `index`")]
    MissingIndex,

    #[error("invalid item id: {0}")]
    InvalidId(String),
}

/// Scanner limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    /// Captured values longer than this are rejected instead of truncated.
    pub max_field_len: usize,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        }
    }
}

/// Parses item documents with fixed limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemParser {
    limits: ScanLimits,
}

impl ItemParser {
    pub fn new(limits: ScanLimits) -> Self {
        Self { limits }
    }

    /// Scan `text` into a draft without validating the result.
    pub fn scan(&self, text: &str) -> Result<ItemDraft, ParseError> {
        let mut scanner = Scanner::new(self.limits);
        for (offset, ch) in text.char_indices() {
            scanner.step(offset, ch)?;
        }
        scanner.finish()
    }

    /// Scan `text` and turn the draft into an [`Item`].
    pub fn parse(&self, text: &str) -> Result<Item, ParseError> {
        let draft = self.scan(text)?;
        finish_draft(draft)
    }
}

/// Parse with default limits.
pub fn parse_item(text: &str) -> Result<Item, ParseError> {
    ItemParser::default().parse(text)
}

fn finish_draft(draft: ItemDraft) -> Result<Item, ParseError> {
    let raw_id = draft.id.ok_or(ParseError::MissingIndex)?;
    let id = ItemId::from_str(&raw_id).map_err(|e| ParseError::InvalidId(e.to_string()))?;

    let weight = if draft.weight >= 0.0 {
        draft.weight
    } else {
        tracing::warn!(item = %id, "document has no weight; treating it as weightless");
        0.0
    };
    let display_name = draft.display_name.unwrap_or_else(|| id.to_string());

    let mut item = Item::new(id, display_name)
        .with_cost(draft.cost)
        .with_weight(weight);
    if let Some(url) = draft.url {
        item = item.with_url(url);
    }
    if let Some(category) = draft.equipment_category {
        item = item.with_equipment_category(CategoryId::new(category));
    }
    Ok(item)
}

/// Which object the scanner is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Root,
    Cost,
    EquipmentCategory,
    Other,
}

impl Context {
    fn nested(self, key: &str) -> Context {
        match (self, key) {
            (Context::Root, "cost") => Context::Cost,
            (Context::Root, "equipment_category") => Context::EquipmentCategory,
            _ => Context::Other,
        }
    }
}

/// Whether the next string in an object is a key or a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Key,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Object { context: Context, position: Position },
    Array,
}

/// Slots whose key has been seen.
#[derive(Debug, Default)]
struct Armed {
    id: bool,
    name: bool,
    weight: bool,
    quantity: bool,
    unit: bool,
    category: bool,
    url: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Escape {
    None,
    Pending,
    /// Inside `\uXXXX`, with the hex digits read so far.
    Unicode { value: u32, digits: u8 },
}

#[derive(Debug)]
struct OpenString {
    start: usize,
    text: String,
    escape: Escape,
    /// Leading half of a UTF-16 surrogate pair, waiting for its partner.
    high_surrogate: Option<u32>,
}

impl OpenString {
    fn new(start: usize) -> Self {
        Self {
            start,
            text: String::new(),
            escape: Escape::None,
            high_surrogate: None,
        }
    }

    /// Consume one character. Returns the decoded text at the closing quote.
    fn feed(&mut self, offset: usize, ch: char) -> Result<Option<String>, ParseError> {
        match self.escape {
            Escape::Pending if ch == 'u' => {
                self.escape = Escape::Unicode { value: 0, digits: 0 };
            }
            Escape::Pending => {
                self.escape = Escape::None;
                self.push(offset, unescape(ch))?;
            }
            Escape::Unicode { value, digits } => {
                let digit = ch.to_digit(16).ok_or(ParseError::InvalidEscape { offset })?;
                let value = value * 16 + digit;
                if digits < 3 {
                    self.escape = Escape::Unicode {
                        value,
                        digits: digits + 1,
                    };
                } else {
                    self.escape = Escape::None;
                    self.push_code_unit(offset, value)?;
                }
            }
            Escape::None => match ch {
                '\\' => self.escape = Escape::Pending,
                '"' => {
                    if self.high_surrogate.is_some() {
                        return Err(ParseError::InvalidEscape { offset });
                    }
                    return Ok(Some(std::mem::take(&mut self.text)));
                }
                _ => self.push(offset, ch)?,
            },
        }
        Ok(None)
    }

    fn push(&mut self, offset: usize, ch: char) -> Result<(), ParseError> {
        if self.high_surrogate.is_some() {
            return Err(ParseError::InvalidEscape { offset });
        }
        self.text.push(ch);
        Ok(())
    }

    fn push_code_unit(&mut self, offset: usize, unit: u32) -> Result<(), ParseError> {
        let scalar = match (self.high_surrogate.take(), unit) {
            (None, 0xD800..=0xDBFF) => {
                self.high_surrogate = Some(unit);
                return Ok(());
            }
            (Some(high), 0xDC00..=0xDFFF) => 0x10000 + ((high - 0xD800) << 10) + (unit - 0xDC00),
            (Some(_), _) => return Err(ParseError::InvalidEscape { offset }),
            (None, unit) => unit,
        };
        let ch = char::from_u32(scalar).ok_or(ParseError::InvalidEscape { offset })?;
        self.text.push(ch);
        Ok(())
    }
}

#[derive(Debug)]
struct Scanner {
    limits: ScanLimits,
    stack: Vec<Frame>,
    started: bool,
    finished: bool,
    string: Option<OpenString>,
    number: Option<String>,
    last_key: String,
    armed: Armed,
    coin_amount: Option<u32>,
    coin_unit: Option<Denomination>,
    draft: ItemDraft,
}

impl Scanner {
    fn new(limits: ScanLimits) -> Self {
        Self {
            limits,
            stack: Vec::new(),
            started: false,
            finished: false,
            string: None,
            number: None,
            last_key: String::new(),
            armed: Armed::default(),
            coin_amount: None,
            coin_unit: None,
            draft: ItemDraft::default(),
        }
    }

    fn step(&mut self, offset: usize, ch: char) -> Result<(), ParseError> {
        if let Some(open) = &mut self.string {
            let Some(text) = open.feed(offset, ch)? else {
                return Ok(());
            };
            self.string = None;
            return self.close_string(text);
        }

        if ch.is_whitespace() {
            return Ok(());
        }
        if self.finished {
            return Err(ParseError::TrailingContent { offset });
        }
        if !self.started {
            if ch != '{' {
                return Err(ParseError::ExpectedObject { offset, found: ch });
            }
            self.started = true;
            self.stack.push(Frame::Object {
                context: Context::Root,
                position: Position::Key,
            });
            return Ok(());
        }

        match ch {
            '"' => {
                self.string = Some(OpenString::new(offset));
            }
            ':' => {
                self.finish_number()?;
                match self.stack.last_mut() {
                    Some(Frame::Object { position, .. }) => *position = Position::Value,
                    _ => return Err(ParseError::UnexpectedDelimiter { offset, found: ch }),
                }
            }
            ',' => {
                self.finish_number()?;
                if let Some(Frame::Object { position, .. }) = self.stack.last_mut() {
                    *position = Position::Key;
                }
            }
            '{' => {
                let context = match self.stack.last() {
                    Some(Frame::Object {
                        context,
                        position: Position::Value,
                    }) => context.nested(&self.last_key),
                    Some(Frame::Array) => Context::Other,
                    _ => return Err(ParseError::UnexpectedDelimiter { offset, found: ch }),
                };
                tracing::trace!(key = %self.last_key, ?context, "object opened");
                self.stack.push(Frame::Object {
                    context,
                    position: Position::Key,
                });
            }
            '}' => {
                self.finish_number()?;
                match self.stack.pop() {
                    Some(Frame::Object { .. }) => {}
                    _ => return Err(ParseError::UnexpectedDelimiter { offset, found: ch }),
                }
                if self.stack.is_empty() {
                    self.finished = true;
                }
            }
            '[' => self.stack.push(Frame::Array),
            ']' => {
                self.finish_number()?;
                match self.stack.pop() {
                    Some(Frame::Array) => {}
                    _ => return Err(ParseError::UnexpectedDelimiter { offset, found: ch }),
                }
            }
            c if c.is_ascii_digit() || c == '-' => {
                self.number.get_or_insert_with(String::new).push(c);
            }
            '.' | 'e' | 'E' | '+' => {
                if let Some(literal) = &mut self.number {
                    literal.push(ch);
                }
            }
            // Bare words (`true`, `false`, `null`) carry nothing we keep.
            _ => {}
        }
        Ok(())
    }

    fn finish(mut self) -> Result<ItemDraft, ParseError> {
        if let Some(open) = &self.string {
            return Err(ParseError::UnterminatedString { offset: open.start });
        }
        if !self.started {
            return Err(ParseError::Empty);
        }
        self.finish_number()?;
        if !self.stack.is_empty() {
            return Err(ParseError::UnexpectedEnd);
        }
        Ok(self.draft)
    }

    fn close_string(&mut self, text: String) -> Result<(), ParseError> {
        match self.stack.last() {
            Some(Frame::Object {
                context,
                position: Position::Key,
            }) => {
                let context = *context;
                self.on_key(context, text);
                Ok(())
            }
            Some(_) => self.on_string_value(text),
            None => Ok(()),
        }
    }

    fn on_key(&mut self, context: Context, key: String) {
        match (context, key.as_str()) {
            (Context::Root, "index") => self.armed.id = true,
            (Context::Root, "name") => self.armed.name = true,
            (Context::Root, "weight") => self.armed.weight = true,
            (Context::Cost, "quantity") => self.armed.quantity = true,
            (Context::Cost, "unit") => self.armed.unit = true,
            (Context::EquipmentCategory, "index") => self.armed.category = true,
            _ => {}
        }
        if key == "url" {
            self.armed.url = true;
        }
        self.last_key = key;
    }

    fn on_string_value(&mut self, text: String) -> Result<(), ParseError> {
        tracing::debug!(key = %self.last_key, value = %text, "string value");

        if self.draft.id.is_none() && self.armed.id {
            self.draft.id = Some(self.capture(Field::Id, text)?);
        } else if self.draft.display_name.is_none() && self.armed.name {
            self.draft.display_name = Some(self.capture(Field::DisplayName, text)?);
        } else if self.coin_unit.is_none() && self.armed.unit {
            let unit = self.capture(Field::CoinUnit, text)?;
            let denomination =
                Denomination::from_str(&unit).map_err(|_| ParseError::UnknownUnit(unit))?;
            self.coin_unit = Some(denomination);
            self.resolve_cost();
        } else if self.armed.category {
            self.draft.equipment_category = Some(self.capture(Field::EquipmentCategory, text)?);
            self.armed.category = false;
        } else if self.armed.url {
            self.draft.url = Some(self.capture(Field::Url, text)?);
            self.armed.url = false;
        }
        Ok(())
    }

    /// A bare number ends at `,`, `}`, `]` or the end of input.
    fn finish_number(&mut self) -> Result<(), ParseError> {
        let Some(literal) = self.number.take() else {
            return Ok(());
        };
        tracing::debug!(key = %self.last_key, value = %literal, "number value");

        if !self.draft.has_weight() && self.armed.weight {
            let weight = match literal.parse::<f64>() {
                Ok(w) if w.is_finite() => w,
                _ => {
                    return Err(ParseError::InvalidNumber {
                        field: Field::Weight,
                        literal,
                    });
                }
            };
            if weight < 0.0 {
                return Err(ParseError::NegativeWeight(weight));
            }
            self.draft.weight = weight;
        } else if self.coin_amount.is_none() && self.armed.quantity {
            let amount = literal
                .parse::<u32>()
                .map_err(|_| ParseError::InvalidNumber {
                    field: Field::CoinQuantity,
                    literal,
                })?;
            self.coin_amount = Some(amount);
            self.resolve_cost();
        }
        Ok(())
    }

    fn resolve_cost(&mut self) {
        if let (Some(amount), Some(unit)) = (self.coin_amount, self.coin_unit) {
            self.draft.cost = Money::from_coins(i64::from(amount), unit);
        }
    }

    fn capture(&self, field: Field, text: String) -> Result<String, ParseError> {
        let len = text.chars().count();
        if len > self.limits.max_field_len {
            return Err(ParseError::FieldTooLong {
                field,
                len,
                max: self.limits.max_field_len,
            });
        }
        Ok(text)
    }
}

fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'b' => '\u{8}',
        'f' => '\u{c}',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    const GREATSWORD: &str = r#"{
        "index": "greatsword",
        "name": "Greatsword",
        "equipment_category": {
            "index": "weapon",
            "name": "Weapon",
            "url": "/api/equipment-categories/weapon"
        },
        "weapon_category": "Martial",
        "weapon_range": "Melee",
        "cost": { "quantity": 50, "unit": "gp" },
        "damage": {
            "damage_dice": "2d6",
            "damage_type": { "index": "slashing", "name": "Slashing", "url": "/api/damage-types/slashing" }
        },
        "range": { "normal": 5 },
        "weight": 6,
        "properties": [
            { "index": "heavy", "name": "Heavy", "url": "/api/weapon-properties/heavy" },
            { "index": "two-handed", "name": "Two-Handed", "url": "/api/weapon-properties/two-handed" }
        ],
        "url": "/api/equipment/greatsword"
    }"#;

    #[test]
    fn parses_minimal_sword() {
        let item = parse_item(
            r#"{"index":"sword","name":"Sword","weight":3,"cost":{"quantity":15,"unit":"gp"}}"#,
        )
        .unwrap();
        assert_eq!(item.id_typed().as_str(), "sword");
        assert_eq!(item.display_name(), "Sword");
        assert_eq!(item.weight(), 3.0);
        assert_eq!(item.cost(), Money::new(15, 0, 0));
        assert!(item.url().is_none());
        assert!(item.equipment_category().is_none());
    }

    #[test]
    fn parses_full_equipment_document() {
        let item = parse_item(GREATSWORD).unwrap();
        assert_eq!(item.id_typed().as_str(), "greatsword");
        assert_eq!(item.display_name(), "Greatsword");
        assert_eq!(item.weight(), 6.0);
        assert_eq!(item.cost(), Money::new(50, 0, 0));
        assert_eq!(item.equipment_category().map(|c| c.as_str()), Some("weapon"));
        assert_eq!(item.url(), Some("/api/equipment/greatsword"));
    }

    #[test]
    fn last_url_in_document_wins() {
        let item = parse_item(
            r#"{"url":"/first","index":"rope","properties":[{"url":"/nested"}],"url":"/last"}"#,
        )
        .unwrap();
        assert_eq!(item.url(), Some("/last"));
    }

    #[test]
    fn nested_index_goes_to_category_not_id() {
        let item =
            parse_item(r#"{"equipment_category":{"index":"adventuring-gear"},"index":"club"}"#)
                .unwrap();
        assert_eq!(item.id_typed().as_str(), "club");
        assert_eq!(
            item.equipment_category().map(|c| c.as_str()),
            Some("adventuring-gear")
        );
    }

    #[test]
    fn index_inside_unrelated_object_is_ignored() {
        let item = parse_item(r#"{"damage_type":{"index":"slashing"},"index":"scimitar"}"#).unwrap();
        assert_eq!(item.id_typed().as_str(), "scimitar");
        assert!(item.equipment_category().is_none());
    }

    #[test]
    fn first_unset_numeric_slot_takes_the_number() {
        // `weight` is armed but carries no number, so the coin quantity that
        // follows fills the weight slot first.
        let item = parse_item(
            r#"{"index":"odd","weight":null,"cost":{"quantity":15,"unit":"sp"}}"#,
        )
        .unwrap();
        assert_eq!(item.weight(), 15.0);
        assert_eq!(item.cost(), Money::zero());
    }

    #[test]
    fn numbers_before_their_key_is_seen_are_ignored() {
        let item = parse_item(r#"{"index":"bow","range":{"normal":80,"long":320},"weight":2}"#)
            .unwrap();
        assert_eq!(item.weight(), 2.0);
        assert_eq!(item.cost(), Money::zero());
    }

    #[test]
    fn unit_before_quantity_still_resolves_cost() {
        let item = parse_item(r#"{"index":"chalk","cost":{"unit":"cp","quantity":1},"weight":0}"#)
            .unwrap();
        assert_eq!(item.cost(), Money::new(0, 0, 1));
    }

    #[test]
    fn trailing_number_is_finalized_by_closing_brace() {
        let item = parse_item(r#"{"index":"waterskin","weight":5.5}"#).unwrap();
        assert_eq!(item.weight(), 5.5);
    }

    #[test]
    fn missing_weight_defaults_to_weightless() {
        let item = parse_item(r#"{"index":"map","name":"Map"}"#).unwrap();
        assert_eq!(item.weight(), 0.0);
    }

    #[test]
    fn draft_keeps_weight_sentinel_when_unset() {
        let draft = ItemParser::default().scan(r#"{"index":"map"}"#).unwrap();
        assert!(!draft.has_weight());
    }

    #[test]
    fn missing_name_falls_back_to_id() {
        let item = parse_item(r#"{"index":"map"}"#).unwrap();
        assert_eq!(item.display_name(), "map");
    }

    #[test]
    fn strings_inside_arrays_are_values_not_keys() {
        let item = parse_item(
            r#"{"index":"pack","desc":["name","url"],"name":"Explorer's Pack"}"#,
        )
        .unwrap();
        assert_eq!(item.display_name(), "Explorer's Pack");
        assert!(item.url().is_none());
    }

    #[test]
    fn escaped_quotes_stay_in_the_value() {
        let item = parse_item(r#"{"index":"tome","name":"The \"Red\" Tome"}"#).unwrap();
        assert_eq!(item.display_name(), "The \"Red\" Tome");
    }

    #[test]
    fn unicode_escapes_are_decoded() {
        let item = parse_item(r#"{"index":"cafe","name":"Caf\u00e9 \u00BDlb"}"#).unwrap();
        assert_eq!(item.display_name(), "Café ½lb");

        let item = parse_item(r#"{"index":"blade","name":"\ud83d\udde1 Blade"}"#).unwrap();
        assert_eq!(item.display_name(), "\u{1F5E1} Blade");
    }

    #[test]
    fn malformed_unicode_escapes_are_rejected() {
        assert_eq!(
            parse_item(r#"{"index":"cafe","name":"Caf\u00zz"}"#),
            Err(ParseError::InvalidEscape { offset: 31 })
        );
        // Lone halves of a surrogate pair.
        assert!(matches!(
            parse_item(r#"{"index":"x","name":"\udc00"}"#),
            Err(ParseError::InvalidEscape { .. })
        ));
        assert!(matches!(
            parse_item(r#"{"index":"x","name":"\ud83d!"}"#),
            Err(ParseError::InvalidEscape { .. })
        ));
        assert!(matches!(
            parse_item(r#"{"index":"x","name":"\ud83d"}"#),
            Err(ParseError::InvalidEscape { .. })
        ));
    }

    #[test]
    fn digits_inside_strings_are_not_numbers() {
        let item = parse_item(r#"{"index":"flail","weight":2,"damage_dice":"1d8"}"#).unwrap();
        assert_eq!(item.weight(), 2.0);
    }

    #[test]
    fn field_at_limit_is_accepted() {
        let name = "n".repeat(DEFAULT_MAX_FIELD_LEN);
        let doc = format!(r#"{{"index":"long","name":"{name}"}}"#);
        assert_eq!(parse_item(&doc).unwrap().display_name(), name);
    }

    #[test]
    fn field_over_limit_is_rejected() {
        let name = "n".repeat(DEFAULT_MAX_FIELD_LEN + 1);
        let doc = format!(r#"{{"index":"long","name":"{name}"}}"#);
        assert_eq!(
            parse_item(&doc).unwrap_err(),
            ParseError::FieldTooLong {
                field: Field::DisplayName,
                len: 50,
                max: 49
            }
        );
    }

    #[test]
    fn long_uncaptured_strings_are_fine() {
        let desc = "d".repeat(500);
        let doc = format!(r#"{{"index":"lamp","desc":["{desc}"]}}"#);
        assert!(parse_item(&doc).is_ok());
    }

    #[test]
    fn custom_limit_applies() {
        let parser = ItemParser::new(ScanLimits { max_field_len: 4 });
        assert!(matches!(
            parser.parse(r#"{"index":"spear"}"#),
            Err(ParseError::FieldTooLong { field: Field::Id, len: 5, max: 4 })
        ));
    }

    #[test]
    fn unterminated_string_reports_its_start() {
        assert_eq!(
            parse_item(r#"{"index":"sword"#).unwrap_err(),
            ParseError::UnterminatedString { offset: 9 }
        );
    }

    #[test]
    fn unknown_unit_is_rejected() {
        assert_eq!(
            parse_item(r#"{"index":"gem","cost":{"quantity":1,"unit":"pp"}}"#).unwrap_err(),
            ParseError::UnknownUnit("pp".to_string())
        );
    }

    #[test]
    fn fractional_coin_quantity_is_rejected() {
        assert!(matches!(
            parse_item(r#"{"index":"gem","cost":{"quantity":1.5,"unit":"gp"}}"#),
            Err(ParseError::InvalidNumber { field: Field::CoinQuantity, .. })
        ));
    }

    #[test]
    fn negative_weight_is_rejected() {
        assert_eq!(
            parse_item(r#"{"index":"balloon","weight":-2}"#).unwrap_err(),
            ParseError::NegativeWeight(-2.0)
        );
    }

    #[test]
    fn structural_errors() {
        assert_eq!(parse_item("   ").unwrap_err(), ParseError::Empty);
        assert!(matches!(
            parse_item(r#"["sword"]"#),
            Err(ParseError::ExpectedObject { offset: 0, found: '[' })
        ));
        assert!(matches!(
            parse_item(r#"{"index":"a"]"#),
            Err(ParseError::UnexpectedDelimiter { found: ']', .. })
        ));
        assert_eq!(
            parse_item(r#"{"index":"a","cost":{"quantity":1"#).unwrap_err(),
            ParseError::UnexpectedEnd
        );
        assert!(matches!(
            parse_item(r#"{"index":"a"} {}"#),
            Err(ParseError::TrailingContent { offset: 14 })
        ));
    }

    #[test]
    fn missing_index_is_rejected() {
        assert_eq!(
            parse_item(r#"{"name":"Rope"}"#).unwrap_err(),
            ParseError::MissingIndex
        );
        assert!(matches!(
            parse_item(r#"{"index":"  "}"#),
            Err(ParseError::InvalidId(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: documents written by a real JSON serializer scan to the
        /// same fields, compact or pretty-printed, whatever the key order.
        #[test]
        fn serializer_output_scans_back(
            index in "[a-z][a-z-]{0,30}",
            name in "[A-Z][A-Za-z ,']{0,40}",
            weight in 0u32..10_000,
            tenths in 0u32..10,
            quantity in 0u32..1_000_000,
            unit in prop::sample::select(vec!["gp", "sp", "cp"]),
            category in "[a-z][a-z-]{0,20}",
            pretty in any::<bool>(),
        ) {
            let weight = f64::from(weight) + f64::from(tenths) / 10.0;
            let doc = json!({
                "index": index,
                "name": name,
                "equipment_category": { "index": category, "url": "/api/categories/x" },
                "cost": { "quantity": quantity, "unit": unit },
                "weight": weight,
                "url": format!("/api/equipment/{index}"),
            });
            let text = if pretty {
                serde_json::to_string_pretty(&doc).unwrap()
            } else {
                serde_json::to_string(&doc).unwrap()
            };

            let item = parse_item(&text).unwrap();
            let denomination: Denomination = unit.parse().unwrap();
            prop_assert_eq!(item.id_typed().as_str(), index.as_str());
            prop_assert_eq!(item.display_name(), name.as_str());
            prop_assert_eq!(item.weight(), weight);
            prop_assert_eq!(item.cost(), Money::from_coins(i64::from(quantity), denomination));
            prop_assert_eq!(item.equipment_category().map(|c| c.as_str()), Some(category.as_str()));
            let expected_url = format!("/api/equipment/{index}");
            prop_assert_eq!(item.url(), Some(expected_url.as_str()));
        }
    }
}
