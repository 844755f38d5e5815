//! Per-visit crawl detail records.
//!
//! DNS results arrive as a flat list of [`RawRecord`]s, one per
//! (group key, record type) request, each holding the responses and their
//! geo annotations. Non-DNS categories are shown as a [`CategorySummary`].

use chrono::{DateTime, Utc};

/// Record types whose `record_data` is an address already shown by the geo
/// annotations.
const ADDRESS_RECORD_TYPES: [&str; 2] = ["A", "AAAA"];

/// IP geolocation and ASN metadata for one response.
///
/// Opaque display fields; numbers from the wire are kept as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoAnnotation {
    /// IP address.
    pub ip: String,
    /// IP version (4 or 6).
    pub ip_version: String,
    /// Country code.
    pub country: String,
    /// Autonomous system number.
    pub asn: String,
    /// Autonomous system organisation.
    pub asn_organisation: String,
}

/// One answer to a DNS request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseEntry {
    /// Raw record data as returned by the resolver.
    pub record_data: String,
    /// Geo annotations, possibly empty.
    pub geo_annotations: Vec<GeoAnnotation>,
}

/// One DNS request of a visit and its responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Logical bucket the record is displayed under (DNS label prefix).
    pub group_key: String,
    /// DNS record type ("A", "MX", "TXT", ...).
    pub record_type: String,
    /// Responses in resolver order.
    pub responses: Vec<ResponseEntry>,
    /// DNS response code of the request.
    pub rcode: Option<i32>,
    /// Whether the request succeeded.
    pub ok: Option<bool>,
    /// Problem description reported by the crawler.
    pub problem: Option<String>,
    /// When the request was made.
    pub crawl_timestamp: Option<DateTime<Utc>>,
}

impl RawRecord {
    /// Whether rendering should print each response's `record_data`.
    ///
    /// `A` and `AAAA` answers are addresses; their geo annotations already
    /// carry the IP, so the data line is suppressed. This is display policy
    /// only; grouping never looks at it.
    pub fn shows_record_data(&self) -> bool {
        !ADDRESS_RECORD_TYPES.contains(&self.record_type.as_str())
    }

    /// The record has at least one response.
    pub fn has_responses(&self) -> bool {
        !self.responses.is_empty()
    }
}

/// Scalar fields of a non-DNS crawl result, sorted by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySummary {
    /// `(field name, rendered value)` pairs.
    pub fields: Vec<(String, String)>,
}

impl CategorySummary {
    /// No fields were returned.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
