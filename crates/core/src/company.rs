use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Image attached to records that arrive without one of their own.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/64";

/// Keys that only appear on full company records, never on the legacy quote list.
const RECORD_ONLY_KEYS: [&str; 4] = ["id", "name", "score", "breakdown"];

/// One company as displayed for a single render pass.
///
/// Every field except the id may be missing upstream; the card layer supplies
/// placeholders for all of them. Decoding never rejects a record over a field:
/// values of the wrong type read as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireRecord")]
pub struct CompanyRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings_date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Breakdown>,
}

impl CompanyRecord {
    pub fn new(id: u32, name: &str, ticker: &str) -> Self {
        Self {
            id: Some(id),
            name: Some(name.to_string()),
            ticker: Some(ticker.to_string()),
            ..Self::default()
        }
    }

    /// Display label: the name, then the ticker, then nothing.
    pub fn label(&self) -> &str {
        non_blank(self.name.as_deref())
            .or_else(|| non_blank(self.ticker.as_deref()))
            .unwrap_or_default()
    }

    pub fn ticker_text(&self) -> &str {
        non_blank(self.ticker.as_deref()).unwrap_or_default()
    }
}

/// A record as it arrives. Both spellings of the renamed keys are read;
/// the camelCase one wins when both carry a value.
#[derive(Deserialize)]
struct WireRecord {
    #[serde(default, deserialize_with = "loose_id")]
    id: Option<u32>,
    #[serde(default, deserialize_with = "loose_text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    ticker: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    price: Option<f64>,
    #[serde(default, deserialize_with = "loose_text")]
    industry: Option<String>,
    #[serde(default, rename = "earningsDate")]
    earnings_date: Option<Value>,
    #[serde(default, rename = "earnings_date")]
    earnings_date_snake: Option<Value>,
    #[serde(default, rename = "imageUrl", deserialize_with = "loose_text")]
    image_url: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    img: Option<String>,
    #[serde(default)]
    score: Option<Value>,
    #[serde(default, deserialize_with = "loose_breakdown")]
    breakdown: Option<Breakdown>,
}

impl From<WireRecord> for CompanyRecord {
    fn from(wire: WireRecord) -> Self {
        Self {
            id: wire.id,
            name: wire.name,
            ticker: wire.ticker,
            price: wire.price,
            industry: wire.industry,
            earnings_date: wire
                .earnings_date
                .filter(|value| !value.is_null())
                .or(wire.earnings_date_snake),
            image_url: wire
                .image_url
                .filter(|url| !url.trim().is_empty())
                .or(wire.img),
            score: wire.score,
            breakdown: wire.breakdown,
        }
    }
}

/// Component scores keyed by name. Unknown keys are kept and ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakdown(Map<String, Value>);

impl Breakdown {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Breakdown {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}

/// Entry of the older `/api/stocks` payload: a bare ticker with its draft price.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LegacyQuote {
    #[serde(default, deserialize_with = "loose_text")]
    pub ticker: Option<String>,
    #[serde(default, deserialize_with = "loose_number")]
    pub price: Option<f64>,
}

impl LegacyQuote {
    pub fn into_record(self, index: usize) -> CompanyRecord {
        CompanyRecord {
            id: Some(position_id(index)),
            name: self.ticker.clone(),
            ticker: self.ticker,
            price: self.price,
            image_url: Some(PLACEHOLDER_IMAGE_URL.to_string()),
            ..CompanyRecord::default()
        }
    }
}

pub fn normalize_legacy(quotes: Vec<LegacyQuote>) -> Vec<CompanyRecord> {
    quotes
        .into_iter()
        .enumerate()
        .map(|(index, quote)| quote.into_record(index))
        .collect()
}

/// Decodes a listing body in either the legacy quote shape or the full record shape.
///
/// Only a body that is not a JSON array is an error.
pub fn decode_listing(body: &str) -> serde_json::Result<Vec<CompanyRecord>> {
    let entries: Vec<Value> = serde_json::from_str(body)?;
    Ok(records_from_entries(entries))
}

/// Turns already-parsed listing entries into records.
///
/// Records without an upstream id get their 1-based position. An entry that
/// is not an object becomes a blank record and renders with placeholders.
pub fn records_from_entries(entries: Vec<Value>) -> Vec<CompanyRecord> {
    if is_legacy_listing(&entries) {
        let quotes = entries
            .into_iter()
            .map(|entry| serde_json::from_value(entry).unwrap_or_default())
            .collect();
        return normalize_legacy(quotes);
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let mut record: CompanyRecord =
                serde_json::from_value(entry).unwrap_or_else(|error| {
                    tracing::warn!(position = index + 1, %error, "unreadable company entry");
                    CompanyRecord::default()
                });
            if record.id.is_none() {
                record.id = Some(position_id(index));
            }
            record
        })
        .collect()
}

fn is_legacy_listing(entries: &[Value]) -> bool {
    !entries.is_empty() && entries.iter().all(is_legacy_entry)
}

fn is_legacy_entry(entry: &Value) -> bool {
    entry.as_object().is_some_and(|fields| {
        fields.contains_key("ticker")
            && fields.contains_key("price")
            && !RECORD_ONLY_KEYS.iter().any(|key| fields.contains_key(*key))
    })
}

fn position_id(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number_text(&number)),
        _ => None,
    })
}

fn loose_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite()))
}

fn loose_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(whole_number))
            .and_then(|id| u32::try_from(id).ok()),
        Some(Value::String(text)) => text.trim().parse::<u32>().ok(),
        _ => None,
    })
}

fn loose_breakdown<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Breakdown>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(fields)) => Some(Breakdown(fields)),
        _ => None,
    })
}

/// JS numbers arrive as floats; whole ones are read as integers.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_number(value: f64) -> Option<u64> {
    (value.fract() == 0.0 && (0.0..=9_007_199_254_740_991.0).contains(&value))
        .then_some(value as u64)
}

/// `12.0` prints as `12`; other numbers print as JSON does.
fn number_text(number: &serde_json::Number) -> String {
    if number.is_f64() {
        if let Some(whole) = number.as_f64().and_then(whole_number) {
            return whole.to_string();
        }
    }
    number.to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// Text form of a loosely typed wire value, or `None` when it should count as missing.
///
/// Null, blank strings and empty lists are missing; lists are joined with commas.
pub fn display_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number_text(number)),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(items) => {
            let parts = items
                .iter()
                .filter_map(|item| display_value(Some(item)))
                .collect::<Vec<_>>();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        object @ Value::Object(_) => Some(object.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_quotes_are_normalized_by_position() {
        let body = json!([{ "ticker": "AAPL", "price": 150 }]).to_string();

        let records = decode_listing(&body).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, Some(1));
        assert_eq!(record.name.as_deref(), Some("AAPL"));
        assert_eq!(record.ticker.as_deref(), Some("AAPL"));
        assert_eq!(record.price, Some(150.0));
        assert!(record
            .image_url
            .as_deref()
            .is_some_and(|url| !url.is_empty()));
    }

    #[test]
    fn legacy_quotes_keep_order_and_ignore_extra_fields() {
        let body = json!([
            { "ticker": "PLTR", "price": 5, "category": "wildcard" },
            { "ticker": "AAPL", "price": 15, "category": "premium" }
        ])
        .to_string();

        let records = decode_listing(&body).unwrap();

        let ids = records.iter().map(|r| r.id).collect::<Vec<_>>();
        let names = records.iter().map(CompanyRecord::label).collect::<Vec<_>>();
        assert_eq!(ids, vec![Some(1), Some(2)]);
        assert_eq!(names, vec!["PLTR", "AAPL"]);
    }

    #[test]
    fn full_records_accept_both_key_spellings() {
        let body = json!([
            {
                "id": 7,
                "name": "Apple",
                "ticker": "AAPL",
                "earnings_date": "2026-01-29",
                "img": "img/aapl.png",
                "score": 12,
                "breakdown": { "eps": 4, "tags": ["beat"] }
            },
            {
                "ticker": "MSFT",
                "earningsDate": "2026-01-28",
                "imageUrl": "img/msft.png"
            }
        ])
        .to_string();

        let records = decode_listing(&body).unwrap();

        assert_eq!(records[0].id, Some(7));
        assert_eq!(records[0].earnings_date, Some(json!("2026-01-29")));
        assert_eq!(records[0].image_url.as_deref(), Some("img/aapl.png"));
        assert_eq!(
            records[0].breakdown.as_ref().and_then(|b| b.get("eps")),
            Some(&json!(4))
        );
        assert_eq!(records[1].id, Some(2));
        assert_eq!(records[1].earnings_date, Some(json!("2026-01-28")));
        assert_eq!(records[1].image_url.as_deref(), Some("img/msft.png"));
    }

    #[test]
    fn records_with_a_price_but_a_name_are_not_legacy() {
        let body = json!([{ "ticker": "AAPL", "name": "Apple", "price": 15 }]).to_string();

        let records = decode_listing(&body).unwrap();

        assert_eq!(records[0].name.as_deref(), Some("Apple"));
        assert_eq!(records[0].image_url, None);
    }

    #[test]
    fn non_array_bodies_are_decode_errors() {
        assert!(decode_listing(r#"{"error": "boom"}"#).is_err());
        assert!(decode_listing("<html>").is_err());
    }

    #[test]
    fn label_prefers_name_then_ticker() {
        let mut record = CompanyRecord::new(1, "Apple", "AAPL");
        assert_eq!(record.label(), "Apple");

        record.name = Some("  ".to_string());
        assert_eq!(record.label(), "AAPL");

        record.ticker = None;
        assert_eq!(record.label(), "");
    }

    #[test]
    fn display_value_treats_empty_values_as_missing() {
        assert_eq!(display_value(None), None);
        assert_eq!(display_value(Some(&Value::Null)), None);
        assert_eq!(display_value(Some(&json!(""))), None);
        assert_eq!(display_value(Some(&json!([]))), None);
        assert_eq!(display_value(Some(&json!(0))), Some("0".to_string()));
        assert_eq!(display_value(Some(&json!(2.5))), Some("2.5".to_string()));
        assert_eq!(
            display_value(Some(&json!(["beat", "raise"]))),
            Some("beat, raise".to_string())
        );
        assert_eq!(display_value(Some(&json!(false))), Some("false".to_string()));
    }

    #[test]
    fn numeric_strings_are_read_as_numbers() {
        let body = json!([{ "id": "7", "name": "Apple", "ticker": "AAPL", "price": "15" }]).to_string();

        let records = decode_listing(&body).unwrap();

        assert_eq!(records[0].id, Some(7));
        assert_eq!(records[0].price, Some(15.0));
    }

    #[test]
    fn both_image_spellings_prefer_image_url() {
        let body = json!([
            { "name": "Apple", "img": "a.png", "imageUrl": "b.png" },
            { "name": "Uber", "img": "u.png", "imageUrl": "" },
            {
                "name": "Snap",
                "earnings_date": "2026-02-04",
                "earningsDate": null
            }
        ])
        .to_string();

        let records = decode_listing(&body).unwrap();

        assert_eq!(records[0].image_url.as_deref(), Some("b.png"));
        assert_eq!(records[1].image_url.as_deref(), Some("u.png"));
        assert_eq!(records[2].earnings_date, Some(json!("2026-02-04")));
    }

    #[test]
    fn one_mistyped_record_keeps_the_rest() {
        let body = json!([
            { "id": 1, "name": "Apple", "ticker": "AAPL", "industry": "Technology" },
            { "id": 2, "name": "Uber", "ticker": 42, "industry": 5, "breakdown": "n/a" },
            { "id": -3, "name": ["odd"], "price": { "usd": 1 } },
            "garbage"
        ])
        .to_string();

        let records = decode_listing(&body).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].industry.as_deref(), Some("Technology"));
        assert_eq!(records[1].ticker.as_deref(), Some("42"));
        assert_eq!(records[1].industry.as_deref(), Some("5"));
        assert_eq!(records[1].breakdown, None);
        assert_eq!(records[2].id, Some(3));
        assert_eq!(records[2].name, None);
        assert_eq!(records[2].price, None);
        assert_eq!(records[3], CompanyRecord { id: Some(4), ..CompanyRecord::default() });
    }

    #[test]
    fn legacy_prices_tolerate_strings_and_junk() {
        let body = json!([
            { "ticker": "AAPL", "price": "15.5" },
            { "ticker": "PLTR", "price": "cheap" }
        ])
        .to_string();

        let records = decode_listing(&body).unwrap();

        assert_eq!(records[0].price, Some(15.5));
        assert_eq!(records[1].price, None);
        assert_eq!(records[1].label(), "PLTR");
    }

    #[test]
    fn whole_floats_read_as_integers() {
        let record: CompanyRecord =
            serde_json::from_value(json!({ "id": 7.0, "score": 12.0 })).unwrap();

        assert_eq!(record.id, Some(7));
        assert_eq!(display_value(record.score.as_ref()), Some("12".to_string()));
        assert_eq!(display_value(Some(&json!(2.5))), Some("2.5".to_string()));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let record = CompanyRecord {
            earnings_date: Some(json!("2026-01-29")),
            image_url: Some("img/aapl.png".to_string()),
            ..CompanyRecord::new(1, "Apple", "AAPL")
        };

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["earningsDate"], json!("2026-01-29"));
        assert_eq!(value["imageUrl"], json!("img/aapl.png"));
        assert_eq!(serde_json::from_value::<CompanyRecord>(value).unwrap(), record);
    }
}
