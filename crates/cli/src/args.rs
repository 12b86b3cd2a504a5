//! Startup flags.
//!
//! ```text
//! haversack [-w <weight>] [-m <N>gp <N>sp <N>cp] [<file>.json [<copies>]]... [-c <camp>.log]
//! ```
//!
//! Flag errors stop the program. Tokens that are neither flags nor item
//! documents are ignored with a warning.

use std::path::PathBuf;

use thiserror::Error;

use haversack_core::money::parse_coin_token;
use haversack_core::{Denomination, Money};
use haversack_inventory::ItemRequest;

/// Most item copies that can be requested on the command line.
pub const MAX_ITEM_COPIES: u32 = 76;

pub const CAMP_LOG_MIN_LEN: usize = 5;
pub const CAMP_LOG_MAX_LEN: usize = 25;

const ITEM_SUFFIX: &str = ".json";
const CAMP_LOG_EXTENSIONS: [&str; 2] = [".log", ".txt"];

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArgsError {
    #[error("`{flag}` needs a value")]
    MissingValue { flag: &'static str },

    #[error("invalid max weight `{0}`, example: -w 25.5")]
    InvalidWeight(String),

    #[error("invalid money `{token}`: expected a `{expected}` amount, example: -m 4gp 42sp 69cp")]
    InvalidMoney {
        token: String,
        expected: Denomination,
    },

    #[error(
        "camp log name `{name}` is {len} characters, it must be {} to {}",
        CAMP_LOG_MIN_LEN,
        CAMP_LOG_MAX_LEN
    )]
    CampLogLength { name: String, len: usize },

    #[error("camp log name `{0}` must end in .log or .txt")]
    CampLogExtension(String),

    #[error("camp log name `{name}` contains `{found}`, only letters, digits and `_` are allowed")]
    CampLogCharacter { name: String, found: char },

    #[error("{requested} item copies requested, at most {max} can be loaded")]
    TooManyItems { requested: u32, max: u32 },
}

/// Everything the flags configure.
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    pub max_weight: f64,
    pub money: Money,
    pub requests: Vec<ItemRequest>,
    pub camp_log: Option<PathBuf>,
    /// Tokens that were skipped.
    pub ignored: Vec<String>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            max_weight: 0.0,
            money: Money::zero(),
            requests: Vec::new(),
            camp_log: None,
            ignored: Vec::new(),
        }
    }
}

impl StartupConfig {
    pub fn requested_copies(&self) -> u32 {
        self.requests
            .iter()
            .fold(0u32, |total, r| total.saturating_add(r.copies))
    }
}

/// Parse the arguments after the program name.
pub fn parse_args<I, S>(args: I) -> Result<StartupConfig, ArgsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
    let mut config = StartupConfig::default();
    let mut tokens = args.iter().map(String::as_str).peekable();

    while let Some(token) = tokens.next() {
        match token {
            "-w" => {
                let value = tokens.next().ok_or(ArgsError::MissingValue { flag: "-w" })?;
                config.max_weight = parse_weight(value)?;
            }
            "-m" => {
                let mut coins = [0i64; 3];
                for (slot, expected) in coins.iter_mut().zip(Denomination::ALL) {
                    let value = tokens.next().ok_or(ArgsError::MissingValue { flag: "-m" })?;
                    *slot = parse_coin(value, expected)?;
                }
                config.money = Money::new(coins[0], coins[1], coins[2]);
            }
            "-c" => {
                let value = tokens.next().ok_or(ArgsError::MissingValue { flag: "-c" })?;
                config.camp_log = Some(validate_camp_log(value)?);
            }
            _ if is_item_document(token) => {
                let copies = match tokens.peek().and_then(|next| next.parse::<u32>().ok()) {
                    Some(n) => {
                        tokens.next();
                        n
                    }
                    None => 1,
                };
                let already = config.requested_copies();
                if copies > MAX_ITEM_COPIES.saturating_sub(already) {
                    return Err(ArgsError::TooManyItems {
                        requested: already.saturating_add(copies),
                        max: MAX_ITEM_COPIES,
                    });
                }
                config.requests.push(ItemRequest::new(token, copies));
            }
            _ => {
                tracing::warn!(token, "unknown argument ignored");
                config.ignored.push(token.to_string());
            }
        }
    }

    Ok(config)
}

fn parse_weight(value: &str) -> Result<f64, ArgsError> {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let dots = value.chars().filter(|c| *c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != value.chars().count() {
        return Err(ArgsError::InvalidWeight(value.to_string()));
    }
    value
        .parse::<f64>()
        .map_err(|_| ArgsError::InvalidWeight(value.to_string()))
}

fn parse_coin(value: &str, expected: Denomination) -> Result<i64, ArgsError> {
    let invalid = || ArgsError::InvalidMoney {
        token: value.to_string(),
        expected,
    };
    match parse_coin_token(value) {
        Ok((amount, denomination)) if denomination == expected => Ok(i64::from(amount)),
        _ => Err(invalid()),
    }
}

fn is_item_document(token: &str) -> bool {
    token.len() > ITEM_SUFFIX.len() && token.ends_with(ITEM_SUFFIX)
}

fn validate_camp_log(name: &str) -> Result<PathBuf, ArgsError> {
    let len = name.chars().count();
    if !(CAMP_LOG_MIN_LEN..=CAMP_LOG_MAX_LEN).contains(&len) {
        return Err(ArgsError::CampLogLength {
            name: name.to_string(),
            len,
        });
    }

    let stem = CAMP_LOG_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
        .ok_or_else(|| ArgsError::CampLogExtension(name.to_string()))?;

    if let Some(found) = stem.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(ArgsError::CampLogCharacter {
            name: name.to_string(),
            found,
        });
    }

    Ok(PathBuf::from(name))
}
