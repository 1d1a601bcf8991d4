//! Instrument catalog
//!
//! Loads the tradable instruments from a JSON file at startup. Tick sizes
//! in the file are display-unit decimals (`0.01` dollars); they are
//! converted to tick-scale integers through the instrument's `price_scale`
//! using exact decimal arithmetic, never floats.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use types::instrument::Instrument;
use types::numeric::{Price, Qty};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read instruments file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse instruments file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid instrument {symbol}: {reason}")]
    InvalidInstrument { symbol: String, reason: String },
}

/// Catalog entry as it appears on disk.
#[derive(Debug, Deserialize)]
struct RawInstrument {
    symbol: String,
    #[serde(default)]
    description: String,
    /// Display-unit decimal, e.g. 0.01
    tick_size: Decimal,
    lot_size: u32,
    price_scale: u32,
}

/// Symbol-keyed instrument lookup.
#[derive(Debug, Clone, Default)]
pub struct InstrumentCatalog {
    instruments: HashMap<String, Instrument>,
}

impl InstrumentCatalog {
    /// Load and validate a catalog from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawInstrument> = serde_json::from_str(text)?;

        let mut instruments = HashMap::with_capacity(raw.len());
        for entry in raw {
            let instrument = convert(entry)?;
            instruments.insert(instrument.symbol.clone(), instrument);
        }
        Ok(Self { instruments })
    }

    /// Lookup by symbol.
    pub fn find(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.get(symbol)
    }

    /// All symbols, sorted.
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.instruments.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}

/// Scale the display-unit tick size into tick-scale integer units.
fn convert(raw: RawInstrument) -> Result<Instrument, CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidInstrument {
        symbol: raw.symbol.clone(),
        reason: reason.to_string(),
    };

    if raw.symbol.is_empty() {
        return Err(CatalogError::InvalidInstrument {
            symbol: "<empty>".to_string(),
            reason: "symbol must be non-empty".to_string(),
        });
    }
    if raw.price_scale == 0 {
        return Err(invalid("price_scale must be positive"));
    }
    if raw.lot_size == 0 {
        return Err(invalid("lot_size must be positive"));
    }

    let ticks = raw.tick_size * Decimal::from(raw.price_scale);
    if ticks <= Decimal::ZERO || ticks.fract() != Decimal::ZERO {
        return Err(invalid("tick_size does not scale to a whole tick"));
    }
    let ticks = ticks
        .to_i64()
        .ok_or_else(|| invalid("tick_size out of range"))?;

    Ok(Instrument {
        symbol: raw.symbol,
        description: raw.description,
        tick_size: Price::new(ticks),
        lot_size: Qty::new(raw.lot_size),
        price_scale: raw.price_scale,
    })
}
