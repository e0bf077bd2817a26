use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::{discogs::PassOutcome, management::CatalogAggregate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: Option<u64>,
    pub username: String,
    pub resource_url: Option<String>,
    pub consumer_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionFolder {
    pub id: Option<u64>,
    pub name: Option<String>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub items: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WantlistInfo {
    pub pagination: Pagination,
    #[serde(default)]
    pub wants: Vec<RawRelease>,
}

/// One page of a catalog listing. Collections deliver `releases`,
/// wantlists deliver `wants`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    pub releases: Option<Vec<RawRelease>>,
    pub wants: Option<Vec<RawRelease>>,
}

impl CatalogPage {
    pub fn into_releases(self) -> Option<Vec<RawRelease>> {
        self.releases.or(self.wants)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRelease {
    pub id: u64,
    pub instance_id: Option<u64>,
    pub basic_information: BasicInformation,
}

impl RawRelease {
    /// Collection items are per copy, wantlist items are per release.
    pub fn instance_id(&self) -> u64 {
        self.instance_id.unwrap_or(self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicInformation {
    pub title: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub artists: Vec<ArtistCredit>,
    #[serde(default)]
    pub formats: Vec<Format>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub styles: Vec<String>,
    pub resource_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistCredit {
    pub name: String,
    #[serde(default)]
    pub anv: String,
    #[serde(default)]
    pub join: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Format {
    pub name: String,
    pub qty: Quantity,
}

/// Format quantities arrive as strings (`"1"`) but numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(u64),
    Text(String),
}

impl Quantity {
    pub fn value(&self) -> Option<u64> {
        match self {
            Quantity::Number(n) => Some(*n),
            Quantity::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    pub name: Option<String>,
    pub catno: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseDetail {
    #[serde(default)]
    pub community: Community,
    pub uri: Option<String>,
    pub notes: Option<String>,
    pub num_for_sale: Option<u64>,
    pub lowest_price: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Community {
    #[serde(default)]
    pub have: u64,
    #[serde(default)]
    pub want: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSuggestion {
    pub currency: Option<String>,
    pub value: f64,
}

/// Grade label (`"Near Mint (NM or M-)"`) to suggested price.
pub type PriceSuggestions = BTreeMap<String, PriceSuggestion>;

/// Normalized grade key (`near_mint`) to a two-decimal price string.
pub type GradePrices = BTreeMap<String, String>;

/// The normalized unit of an export, keyed by artist and instance id.
///
/// Base fields are filled once when the record is created. The optional
/// fields are only present when the matching enrichment pass ran.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub album: String,
    pub year: i32,
    pub id: u64,
    pub format: String,
    pub quantity: String,
    pub instance_id: u64,
    pub catno: String,
    pub styles: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub have: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub want: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_for_sale: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowest_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices: Option<GradePrices>,
}

/// Extra per-release data from the release detail endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseEnrichment {
    pub have: u64,
    pub want: u64,
    pub uri: String,
    pub notes: String,
    pub num_for_sale: u64,
    pub lowest_price: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentCandidate {
    pub artist: String,
    pub instance_id: u64,
    pub release_id: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Currency {
    Aud,
    Brl,
    Cad,
    Chf,
    #[default]
    Eur,
    Gbp,
    Jpy,
    Mxn,
    Nzd,
    Sek,
    Usd,
    Zar,
}

impl Currency {
    pub const ALL: [Currency; 12] = [
        Currency::Aud,
        Currency::Brl,
        Currency::Cad,
        Currency::Chf,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Mxn,
        Currency::Nzd,
        Currency::Sek,
        Currency::Usd,
        Currency::Zar,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Aud => "AUD",
            Currency::Brl => "BRL",
            Currency::Cad => "CAD",
            Currency::Chf => "CHF",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Mxn => "MXN",
            Currency::Nzd => "NZD",
            Currency::Sek => "SEK",
            Currency::Usd => "USD",
            Currency::Zar => "ZAR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Collection,
    Wantlist,
}

impl CatalogKind {
    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::Collection => "collection",
            CatalogKind::Wantlist => "wantlist",
        }
    }

    pub fn default_file(&self) -> &'static str {
        match self {
            CatalogKind::Collection => "discogs-collection.xlsx",
            CatalogKind::Wantlist => "discogs-wantlist.xlsx",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which enrichment passes to run after pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentOptions {
    pub details: bool,
    pub prices: bool,
    pub currency: Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Catalog,
    Details,
    Prices,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Catalog => f.write_str("catalog"),
            Pass::Details => f.write_str("details"),
            Pass::Prices => f.write_str("prices"),
        }
    }
}

#[derive(Debug)]
pub struct PassReport {
    pub pass: Pass,
    pub outcome: PassOutcome,
}

/// Everything the spreadsheet writer needs for one export.
#[derive(Debug)]
pub struct CatalogExport {
    pub username: String,
    pub kind: CatalogKind,
    pub aggregate: CatalogAggregate,
    pub passes: Vec<PassReport>,
}

impl CatalogExport {
    pub fn is_partial(&self) -> bool {
        self.passes.iter().any(|p| !p.outcome.is_complete())
    }

    pub fn outcome(&self, pass: Pass) -> Option<&PassOutcome> {
        self.passes
            .iter()
            .find(|p| p.pass == pass)
            .map(|p| &p.outcome)
    }
}

#[derive(Tabled)]
pub struct SummaryTableRow {
    pub catalog: String,
    pub artists: usize,
    pub releases: usize,
    pub details: String,
    pub prices: String,
    pub status: String,
}
