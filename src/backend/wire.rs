//! JSON shapes returned by the crawl inspection API.
//!
//! Parse at the boundary: these types exist only to be converted into the
//! domain model. Every field is optional on the wire and defaulted here.

use crate::model::{
    CategorySummary, CrawlStatus, GeoAnnotation, Page, RawRecord, ResponseEntry, VisitId,
    VisitSummary,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ===== Timeline =====

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VisitPageDto {
    #[serde(default)]
    dtos: Vec<VisitDto>,
    #[serde(default)]
    amount_of_pages: u32,
    #[serde(default)]
    amount_of_records: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisitDto {
    visit_id: VisitId,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    request_time_stamp: Option<DateTime<Utc>>,
    #[serde(default)]
    crawl_status: CrawlStatusDto,
}

#[derive(Debug, Default, Deserialize)]
struct CrawlStatusDto {
    #[serde(default)]
    muppets: Option<bool>,
    #[serde(default)]
    dns: Option<bool>,
    #[serde(default)]
    smtp: Option<bool>,
    #[serde(default)]
    wappalyzer: Option<bool>,
}

impl VisitPageDto {
    /// Convert into a [`Page`] at the index that was requested.
    ///
    /// The backend's `hasNext`/`hasPrevious` are ignored; the page derives
    /// its own flags.
    pub(crate) fn into_page(self, page_index: u32) -> Page {
        let items = self
            .dtos
            .into_iter()
            .map(|dto| VisitSummary {
                visit_id: dto.visit_id,
                timestamp: dto.request_time_stamp,
                crawl_status: CrawlStatus {
                    content: dto.crawl_status.muppets.unwrap_or(false),
                    dns: dto.crawl_status.dns.unwrap_or(false),
                    smtp: dto.crawl_status.smtp.unwrap_or(false),
                    fingerprint: dto.crawl_status.wappalyzer.unwrap_or(false),
                },
            })
            .collect();

        Page::new(
            items,
            page_index,
            self.amount_of_pages,
            self.amount_of_records,
        )
    }
}

// ===== DNS requests =====

#[derive(Debug, Deserialize)]
pub(crate) struct DnsRequestsDto {
    #[serde(rename = "_embedded", default)]
    embedded: Option<DnsEmbeddedDto>,
}

#[derive(Debug, Default, Deserialize)]
struct DnsEmbeddedDto {
    #[serde(default)]
    requests: Vec<DnsRequestDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DnsRequestDto {
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    record_type: Option<String>,
    #[serde(default)]
    rcode: Option<i32>,
    #[serde(default)]
    ok: Option<bool>,
    #[serde(default)]
    problem: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    crawl_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    responses: Vec<DnsResponseDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DnsResponseDto {
    #[serde(default)]
    record_data: Option<String>,
    #[serde(default)]
    response_geo_ips: Vec<GeoIpDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoIpDto {
    #[serde(default)]
    ip: Value,
    #[serde(default)]
    ip_version: Value,
    #[serde(default)]
    country: Value,
    #[serde(default)]
    asn: Value,
    #[serde(default)]
    asn_organisation: Value,
}

impl DnsRequestsDto {
    /// Convert into raw records in response order.
    ///
    /// A body without `_embedded` means the visit has no DNS requests.
    pub(crate) fn into_records(self) -> Vec<RawRecord> {
        self.embedded
            .unwrap_or_default()
            .requests
            .into_iter()
            .map(|req| RawRecord {
                group_key: req.prefix.unwrap_or_default(),
                record_type: req.record_type.unwrap_or_default(),
                responses: req
                    .responses
                    .into_iter()
                    .map(|resp| ResponseEntry {
                        record_data: resp.record_data.unwrap_or_default(),
                        geo_annotations: resp
                            .response_geo_ips
                            .into_iter()
                            .map(|geo| GeoAnnotation {
                                ip: scalar_text(&geo.ip),
                                ip_version: scalar_text(&geo.ip_version),
                                country: scalar_text(&geo.country),
                                asn: scalar_text(&geo.asn),
                                asn_organisation: scalar_text(&geo.asn_organisation),
                            })
                            .collect(),
                    })
                    .collect(),
                rcode: req.rcode,
                ok: req.ok,
                problem: req.problem,
                crawl_timestamp: req.crawl_timestamp,
            })
            .collect()
    }
}

// ===== Category summaries =====

/// Summarize a repository-search body: scalar fields of the first embedded
/// result, in field-name order. Nested objects and arrays are skipped.
pub(crate) fn summarize(body: &Value) -> CategorySummary {
    let first = body
        .get("_embedded")
        .and_then(Value::as_object)
        .and_then(|embedded| embedded.values().find_map(Value::as_array))
        .and_then(|results| results.first())
        .and_then(Value::as_object);

    let Some(object) = first else {
        return CategorySummary::default();
    };

    let mut fields: Vec<(String, String)> = object
        .iter()
        .filter(|(_, value)| !value.is_object() && !value.is_array())
        .map(|(name, value)| (name.clone(), scalar_text(value)))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    CategorySummary { fields }
}

// ===== Helpers =====

/// Render a JSON scalar as display text. Strings lose their quotes, null
/// becomes empty.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Accept RFC 3339 strings, zone-less ISO strings (taken as UTC) and epoch
/// milliseconds. Anything else deserializes to `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_timestamp))
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            }),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}
