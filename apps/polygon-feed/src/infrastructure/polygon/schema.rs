//! Record Schemas and Tag Tables
//!
//! Each record kind owns its field table: the [`WireRecord`] impl below lists
//! exactly the wire names that kind reads and the type each one has. No field
//! parser is shared between kinds, so `"c"` can be a condition list on a
//! trade, one condition on a quote, and a close price on an aggregate.
//!
//! The tag tables map `(asset class, tag)` to a kind and its decoder. They
//! are `'static` constants; status tags are consulted before the asset class
//! table.

use crate::domain::asset_class::{AssetClass, RecordKind};
use crate::domain::errors::DecodeError;
use crate::domain::events::{
    CryptoAggregate, CryptoConsolidatedQuote, CryptoLevel2Tick, CryptoQuote, CryptoTrade, Event,
    ForexAggregate, ForexQuote, StatusMessage, StockAggregate, StockQuote, StockTrade,
};

use super::fields::RecordReader;

/// A record kind decodable from its wire fields.
pub trait WireRecord: Sized + Into<Event> {
    /// Kind produced by this schema.
    const KIND: RecordKind;

    /// Decode from a tagged record.
    ///
    /// # Errors
    ///
    /// Returns `FieldTypeMismatch` for the first field of the wrong type.
    fn decode(reader: &RecordReader<'_>) -> Result<Self, DecodeError>;
}

// =============================================================================
// Status
// =============================================================================

impl WireRecord for StatusMessage {
    const KIND: RecordKind = RecordKind::Status;

    fn decode(r: &RecordReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            event_type: r.tag().to_string(),
            status: r.string("status")?,
            message: r.string("message")?,
        })
    }
}

// =============================================================================
// Equities
// =============================================================================

impl WireRecord for StockTrade {
    const KIND: RecordKind = RecordKind::Trade;

    fn decode(r: &RecordReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            event_type: r.tag().to_string(),
            ticker: r.string("sym")?,
            exchange_id: r.integer("x")?,
            trade_id: r.string("i")?,
            tape: r.string("z")?,
            price: r.float("p")?,
            size: r.float("s")?,
            conditions: r.codes("c")?,
            timestamp_millis: r.millis("t")?,
        })
    }
}

impl WireRecord for StockQuote {
    const KIND: RecordKind = RecordKind::Quote;

    fn decode(r: &RecordReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            event_type: r.tag().to_string(),
            ticker: r.string("sym")?,
            bid_exchange_id: r.integer("bx")?,
            bid_price: r.float("bp")?,
            bid_size: r.float("bs")?,
            ask_exchange_id: r.integer("ax")?,
            ask_price: r.float("ap")?,
            ask_size: r.float("as")?,
            condition: r.code("c")?,
            timestamp_millis: r.millis("t")?,
        })
    }
}

impl WireRecord for StockAggregate {
    const KIND: RecordKind = RecordKind::Aggregate;

    fn decode(r: &RecordReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            event_type: r.tag().to_string(),
            ticker: r.string("sym")?,
            volume: r.float("v")?,
            accumulated_volume: r.float("av")?,
            official_open_price: r.float("op")?,
            volume_weighted_average_price: r.float("vw")?,
            open_price: r.float("o")?,
            close_price: r.float("c")?,
            high_price: r.float("h")?,
            low_price: r.float("l")?,
            average_price: r.float("a")?,
            start_timestamp_millis: r.millis("s")?,
            end_timestamp_millis: r.millis("e")?,
        })
    }
}

// =============================================================================
// Forex
// =============================================================================

impl WireRecord for ForexQuote {
    const KIND: RecordKind = RecordKind::Quote;

    fn decode(r: &RecordReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            event_type: r.tag().to_string(),
            currency_pair: r.string("p")?,
            exchange_id: r.integer("x")?,
            ask_price: r.float("a")?,
            bid_price: r.float("b")?,
            timestamp_millis: r.millis("t")?,
        })
    }
}

impl WireRecord for ForexAggregate {
    const KIND: RecordKind = RecordKind::Aggregate;

    fn decode(r: &RecordReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            event_type: r.tag().to_string(),
            currency_pair: r.string("pair")?,
            open_price: r.float("o")?,
            close_price: r.float("c")?,
            high_price: r.float("h")?,
            low_price: r.float("l")?,
            volume: r.float("v")?,
            start_timestamp_millis: r.millis("s")?,
            end_timestamp_millis: r.millis("e")?,
        })
    }
}

// =============================================================================
// Crypto
// =============================================================================

impl WireRecord for CryptoQuote {
    const KIND: RecordKind = RecordKind::Quote;

    fn decode(r: &RecordReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            event_type: r.tag().to_string(),
            pair: r.string("pair")?,
            last_trade_price: r.float("lp")?,
            last_trade_size: r.float("ls")?,
            bid_price: r.float("bp")?,
            bid_size: r.float("bs")?,
            ask_price: r.float("ap")?,
            ask_size: r.float("as")?,
            exchange_timestamp_millis: r.millis("t")?,
            exchange_id: r.integer("x")?,
            received_timestamp_millis: r.millis("r")?,
        })
    }
}

impl WireRecord for CryptoTrade {
    const KIND: RecordKind = RecordKind::Trade;

    fn decode(r: &RecordReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            event_type: r.tag().to_string(),
            pair: r.string("pair")?,
            price: r.float("p")?,
            size: r.float("s")?,
            conditions: r.codes("c")?,
            trade_id: r.string("i")?,
            exchange_timestamp_millis: r.millis("t")?,
            exchange_id: r.integer("x")?,
            received_timestamp_millis: r.millis("r")?,
        })
    }
}

impl WireRecord for CryptoAggregate {
    const KIND: RecordKind = RecordKind::Aggregate;

    fn decode(r: &RecordReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            event_type: r.tag().to_string(),
            pair: r.string("pair")?,
            open_price: r.float("o")?,
            open_exchange_id: r.integer("ox")?,
            high_price: r.float("h")?,
            high_exchange_id: r.integer("hx")?,
            low_price: r.float("l")?,
            low_exchange_id: r.integer("lx")?,
            close_price: r.float("c")?,
            close_exchange_id: r.integer("cx")?,
            volume: r.float("v")?,
            start_timestamp_millis: r.millis("s")?,
            end_timestamp_millis: r.millis("e")?,
        })
    }
}

impl WireRecord for CryptoConsolidatedQuote {
    const KIND: RecordKind = RecordKind::ConsolidatedQuote;

    fn decode(r: &RecordReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            event_type: r.tag().to_string(),
            pair: r.string("pair")?,
            ask_size: r.float("as")?,
            ask_price: r.float("ap")?,
            ask_exchange_id: r.integer("ax")?,
            bid_size: r.float("bs")?,
            bid_price: r.float("bp")?,
            bid_exchange_id: r.integer("bx")?,
            timestamp_millis: r.millis("t")?,
        })
    }
}

impl WireRecord for CryptoLevel2Tick {
    const KIND: RecordKind = RecordKind::Level2Tick;

    fn decode(r: &RecordReader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            event_type: r.tag().to_string(),
            pair: r.string("pair")?,
            bids: r.levels("b")?,
            asks: r.levels("a")?,
            timestamp_millis: r.millis("t")?,
            exchange_id: r.integer("x")?,
            received_timestamp_millis: r.millis("r")?,
        })
    }
}

// =============================================================================
// Tag Tables
// =============================================================================

type DecodeFn = fn(&RecordReader<'_>) -> Result<Event, DecodeError>;

fn decode_as<T: WireRecord>(reader: &RecordReader<'_>) -> Result<Event, DecodeError> {
    T::decode(reader).map(Into::into)
}

/// One row of a tag table.
#[derive(Clone, Copy)]
pub struct TagEntry {
    /// Wire tag.
    pub tag: &'static str,
    /// Kind the tag decodes to.
    pub kind: RecordKind,
    decode: DecodeFn,
}

impl TagEntry {
    const fn of<T: WireRecord>(tag: &'static str) -> Self {
        Self {
            tag,
            kind: T::KIND,
            decode: decode_as::<T>,
        }
    }

    /// Decode a record with this entry's schema.
    ///
    /// # Errors
    ///
    /// Returns `FieldTypeMismatch` for the first field of the wrong type.
    pub fn decode(&self, reader: &RecordReader<'_>) -> Result<Event, DecodeError> {
        (self.decode)(reader)
    }
}

impl std::fmt::Debug for TagEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagEntry")
            .field("tag", &self.tag)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Control tags, valid under every asset class.
pub const STATUS_TAGS: &[TagEntry] = &[TagEntry::of::<StatusMessage>("status")];

/// Equities tags.
pub const EQUITIES_TAGS: &[TagEntry] = &[
    TagEntry::of::<StockTrade>("T"),
    TagEntry::of::<StockQuote>("Q"),
    TagEntry::of::<StockAggregate>("A"),
    TagEntry::of::<StockAggregate>("AM"),
];

/// Forex tags.
pub const FOREX_TAGS: &[TagEntry] = &[
    TagEntry::of::<ForexQuote>("C"),
    TagEntry::of::<ForexAggregate>("CA"),
    TagEntry::of::<ForexAggregate>("CAS"),
];

/// Crypto tags.
pub const CRYPTO_TAGS: &[TagEntry] = &[
    TagEntry::of::<CryptoTrade>("XT"),
    TagEntry::of::<CryptoQuote>("XQT"),
    TagEntry::of::<CryptoAggregate>("XA"),
    TagEntry::of::<CryptoAggregate>("XAS"),
    TagEntry::of::<CryptoConsolidatedQuote>("XS"),
    TagEntry::of::<CryptoLevel2Tick>("XL2"),
];

/// Data tag table for an asset class (status tags excluded).
#[must_use]
pub const fn tag_table(asset_class: AssetClass) -> &'static [TagEntry] {
    match asset_class {
        AssetClass::Equities => EQUITIES_TAGS,
        AssetClass::Forex => FOREX_TAGS,
        AssetClass::Crypto => CRYPTO_TAGS,
    }
}

/// Resolve a tag under an asset class, status tags first.
#[must_use]
pub fn lookup(asset_class: AssetClass, tag: &str) -> Option<&'static TagEntry> {
    STATUS_TAGS
        .iter()
        .chain(tag_table(asset_class))
        .find(|entry| entry.tag == tag)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_case::test_case;

    use super::*;
    use crate::domain::subscription::Channel;

    #[test_case(AssetClass::Equities, "T", RecordKind::Trade)]
    #[test_case(AssetClass::Equities, "Q", RecordKind::Quote)]
    #[test_case(AssetClass::Equities, "A", RecordKind::Aggregate)]
    #[test_case(AssetClass::Equities, "AM", RecordKind::Aggregate)]
    #[test_case(AssetClass::Forex, "C", RecordKind::Quote)]
    #[test_case(AssetClass::Forex, "CA", RecordKind::Aggregate)]
    #[test_case(AssetClass::Forex, "CAS", RecordKind::Aggregate)]
    #[test_case(AssetClass::Crypto, "XT", RecordKind::Trade)]
    #[test_case(AssetClass::Crypto, "XQT", RecordKind::Quote)]
    #[test_case(AssetClass::Crypto, "XA", RecordKind::Aggregate)]
    #[test_case(AssetClass::Crypto, "XS", RecordKind::ConsolidatedQuote)]
    #[test_case(AssetClass::Crypto, "XL2", RecordKind::Level2Tick)]
    fn tag_resolves_to_kind(asset_class: AssetClass, tag: &str, kind: RecordKind) {
        assert_eq!(lookup(asset_class, tag).map(|e| e.kind), Some(kind));
    }

    #[test_case(AssetClass::Crypto, "C" ; "forex quote under crypto")]
    #[test_case(AssetClass::Crypto, "XQ" ; "bare XQ under crypto")]
    #[test_case(AssetClass::Equities, "XT" ; "crypto trade under equities")]
    #[test_case(AssetClass::Forex, "T" ; "equities trade under forex")]
    #[test_case(AssetClass::Equities, "t" ; "tags are case sensitive")]
    fn tag_not_valid_for_asset_class(asset_class: AssetClass, tag: &str) {
        assert!(lookup(asset_class, tag).is_none());
    }

    #[test]
    fn status_resolves_under_every_asset_class() {
        for class in AssetClass::ALL {
            assert_eq!(
                lookup(class, "status").map(|e| e.kind),
                Some(RecordKind::Status)
            );
        }
    }

    #[test]
    fn tags_unique_within_asset_class() {
        for class in AssetClass::ALL {
            let mut seen = HashSet::new();
            for entry in STATUS_TAGS.iter().chain(tag_table(class)) {
                assert!(seen.insert(entry.tag), "duplicate tag {} in {class}", entry.tag);
            }
        }
    }

    #[test]
    fn every_channel_prefix_is_a_tag() {
        for channel in Channel::ALL {
            assert!(
                lookup(channel.asset_class(), channel.prefix()).is_some(),
                "channel {channel:?} has no tag entry"
            );
        }
    }

    #[test]
    fn consolidated_and_level2_only_exist_for_crypto() {
        for class in [AssetClass::Equities, AssetClass::Forex] {
            assert!(tag_table(class).iter().all(|e| {
                e.kind != RecordKind::ConsolidatedQuote && e.kind != RecordKind::Level2Tick
            }));
        }
    }
}
