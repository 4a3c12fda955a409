//! Response decoding: root-tag discrimination, the item data model, and
//! service error documents.
//!
//! A 200 response must carry the root element matching the requested
//! operation; anything else is a decode error. Non-200 responses carry an
//! error document whose code decides between a retryable throttle and a
//! terminal failure. Missing elements inside a well-formed envelope never
//! fail decoding, they leave zero values behind.

use crate::error::{DecodeError, ServiceError};
use quick_xml::events::Event;
use serde::Deserialize;
use std::fmt;

/// Error code the service uses to ask for a slower request rate.
const THROTTLE_CODE: &str = "RequestThrottled";

/// The three operations sharing the item envelope, each with its own
/// response root tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeKind {
    ItemLookup,
    ItemSearch,
    SimilarityLookup,
}

impl EnvelopeKind {
    /// Returns the `Operation` parameter value for this kind.
    pub fn operation(&self) -> &'static str {
        match self {
            EnvelopeKind::ItemLookup => "ItemLookup",
            EnvelopeKind::ItemSearch => "ItemSearch",
            EnvelopeKind::SimilarityLookup => "SimilarityLookup",
        }
    }

    /// Returns the root element a successful response must carry.
    pub fn root_tag(&self) -> &'static str {
        match self {
            EnvelopeKind::ItemLookup => "ItemLookupResponse",
            EnvelopeKind::ItemSearch => "ItemSearchResponse",
            EnvelopeKind::SimilarityLookup => "SimilarityLookupResponse",
        }
    }

    fn wrap(self, payload: ItemsEnvelope) -> ResponseEnvelope {
        match self {
            EnvelopeKind::ItemLookup => ResponseEnvelope::ItemLookup(payload),
            EnvelopeKind::ItemSearch => ResponseEnvelope::ItemSearch(payload),
            EnvelopeKind::SimilarityLookup => ResponseEnvelope::SimilarityLookup(payload),
        }
    }
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operation())
    }
}

/// A decoded response, tagged with the operation that produced it.
#[derive(Debug, Clone)]
pub enum ResponseEnvelope {
    ItemLookup(ItemsEnvelope),
    ItemSearch(ItemsEnvelope),
    SimilarityLookup(ItemsEnvelope),
}

impl ResponseEnvelope {
    /// Returns which operation this envelope answers.
    pub fn kind(&self) -> EnvelopeKind {
        match self {
            ResponseEnvelope::ItemLookup(_) => EnvelopeKind::ItemLookup,
            ResponseEnvelope::ItemSearch(_) => EnvelopeKind::ItemSearch,
            ResponseEnvelope::SimilarityLookup(_) => EnvelopeKind::SimilarityLookup,
        }
    }

    /// Returns the shared item payload.
    pub fn payload(&self) -> &ItemsEnvelope {
        match self {
            ResponseEnvelope::ItemLookup(payload) => payload,
            ResponseEnvelope::ItemSearch(payload) => payload,
            ResponseEnvelope::SimilarityLookup(payload) => payload,
        }
    }

    /// Consumes the envelope, returning just the payload.
    pub fn into_payload(self) -> ItemsEnvelope {
        match self {
            ResponseEnvelope::ItemLookup(payload) => payload,
            ResponseEnvelope::ItemSearch(payload) => payload,
            ResponseEnvelope::SimilarityLookup(payload) => payload,
        }
    }
}

/// Outcome of decoding one HTTP exchange.
#[derive(Debug)]
pub enum Decoded {
    /// A well-formed envelope of the expected kind.
    Envelope(ResponseEnvelope),
    /// The service asked for a slower request rate; safe to retry.
    Throttled(ServiceError),
    /// A terminal service failure.
    Failure(ServiceError),
}

/// Decodes one response body according to its HTTP status.
pub fn decode(kind: EnvelopeKind, status: u16, body: &[u8]) -> Result<Decoded, DecodeError> {
    let text = std::str::from_utf8(body)?;

    if status != 200 {
        let doc: ErrorDocument = quick_xml::de::from_str(text)?;
        let error = ServiceError {
            code: doc.error.code,
            message: doc.error.message,
            request_id: doc.request_id,
        };
        return Ok(if error.code == THROTTLE_CODE {
            Decoded::Throttled(error)
        } else {
            Decoded::Failure(error)
        });
    }

    let root = root_element_name(text)?;
    if root != kind.root_tag() {
        return Err(DecodeError::UnexpectedRoot { expected: kind.root_tag(), found: root });
    }

    let payload: ItemsEnvelope = quick_xml::de::from_str(text)?;
    Ok(Decoded::Envelope(kind.wrap(payload)))
}

/// Returns the local name of the document's root element.
fn root_element_name(text: &str) -> Result<String, DecodeError> {
    let mut reader = quick_xml::Reader::from_str(text);
    loop {
        match reader.read_event()? {
            Event::Start(element) | Event::Empty(element) => {
                return Ok(String::from_utf8_lossy(element.local_name().as_ref()).into_owned());
            }
            Event::Eof => return Err(DecodeError::MissingRoot),
            _ => {}
        }
    }
}

/// Payload shared by all three item envelopes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemsEnvelope {
    pub operation_request: OperationRequest,
    pub items: Items,
}

/// The service's echo of how it processed the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OperationRequest {
    #[serde(rename = "HTTPHeaders")]
    http_headers: HeaderList,
    arguments: ArgumentList,
    pub request_id: String,
    pub request_processing_time: f64,
}

impl OperationRequest {
    /// Returns the request headers the service saw.
    pub fn http_headers(&self) -> &[NameValue] {
        &self.http_headers.entries
    }

    /// Returns the query arguments the service saw.
    pub fn arguments(&self) -> &[NameValue] {
        &self.arguments.entries
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct HeaderList {
    #[serde(rename = "Header", default)]
    entries: Vec<NameValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ArgumentList {
    #[serde(rename = "Argument", default)]
    entries: Vec<NameValue>,
}

/// A name/value pair carried as element attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NameValue {
    #[serde(rename = "@Name")]
    pub name: String,
    #[serde(rename = "@Value")]
    pub value: String,
}

/// The item list plus the service's validation echo.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Items {
    pub request: RequestEcho,
    #[serde(rename = "Item")]
    pub items: Vec<Item>,
}

/// Validation state and any per-request errors the service reports inside
/// a successful envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RequestEcho {
    is_valid: String,
    pub item_lookup_request: Option<ItemLookupRequest>,
    errors: ErrorList,
}

impl RequestEcho {
    /// Whether the service judged the request valid. The wire carries the
    /// literal text `True` or `False`.
    pub fn is_valid(&self) -> bool {
        self.is_valid.eq_ignore_ascii_case("true")
    }

    /// Returns the errors reported inside this envelope. These describe
    /// per-item problems such as an unknown ASIN and arrive alongside a
    /// 200 status, so they are data rather than failures.
    pub fn errors(&self) -> &[EmbeddedError] {
        &self.errors.entries
    }

    /// Returns true when the envelope reports at least one error.
    pub fn has_errors(&self) -> bool {
        !self.errors.entries.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorList {
    #[serde(rename = "Error", default)]
    entries: Vec<EmbeddedError>,
}

/// One error reported inside a successful envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EmbeddedError {
    pub code: String,
    pub message: String,
}

/// The lookup parameters the service echoes back.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemLookupRequest {
    pub condition: String,
    pub id_type: String,
    pub item_id: String,
    #[serde(rename = "ResponseGroup")]
    pub response_groups: Vec<String>,
    pub variation_page: String,
}

/// One catalog item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Item {
    #[serde(rename = "ASIN")]
    pub asin: String,
    #[serde(rename = "ParentASIN")]
    pub parent_asin: String,
    #[serde(rename = "DetailPageURL")]
    pub detail_page_url: String,
    pub sales_rank: String,
    item_links: ItemLinkList,
    pub small_image: Option<Image>,
    pub medium_image: Option<Image>,
    pub large_image: Option<Image>,
    image_sets: ImageSetList,
    pub item_attributes: Option<ItemAttributes>,
    pub offer_summary: Option<OfferSummary>,
    editorial_reviews: EditorialReviewList,
    browse_nodes: BrowseNodeList,
}

impl Item {
    /// Returns the item's outbound links.
    pub fn item_links(&self) -> &[ItemLink] {
        &self.item_links.entries
    }

    /// Returns the item's image sets, one per category.
    pub fn image_sets(&self) -> &[ImageSet] {
        &self.image_sets.entries
    }

    /// Returns the item's editorial reviews.
    pub fn editorial_reviews(&self) -> &[EditorialReview] {
        &self.editorial_reviews.entries
    }

    /// Returns the browse nodes the item is filed under.
    pub fn browse_nodes(&self) -> &[BrowseNode] {
        &self.browse_nodes.entries
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ItemLinkList {
    #[serde(rename = "ItemLink", default)]
    entries: Vec<ItemLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ImageSetList {
    #[serde(rename = "ImageSet", default)]
    entries: Vec<ImageSet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EditorialReviewList {
    #[serde(rename = "EditorialReview", default)]
    entries: Vec<EditorialReview>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct BrowseNodeList {
    #[serde(rename = "BrowseNode", default)]
    entries: Vec<BrowseNode>,
}

/// A named link attached to an item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemLink {
    pub description: String,
    #[serde(rename = "URL")]
    pub url: String,
}

/// One image with its pixel dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Image {
    #[serde(rename = "URL")]
    pub url: String,
    pub height: u16,
    pub width: u16,
}

/// A categorized group of image variants.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageSet {
    #[serde(rename = "@Category")]
    pub category: String,
    pub swatch_image: Option<Image>,
    pub small_image: Option<Image>,
    pub thumbnail_image: Option<Image>,
    pub tiny_image: Option<Image>,
    pub medium_image: Option<Image>,
    pub large_image: Option<Image>,
}

/// The subset of item attributes this client surfaces.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemAttributes {
    pub title: String,
    pub brand: String,
    pub list_price: Option<Price>,
}

/// Lowest offers per condition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OfferSummary {
    pub lowest_new_price: Option<Price>,
    pub lowest_used_price: Option<Price>,
    pub lowest_collectible_price: Option<Price>,
}

/// A price in minor currency units with its display form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Price {
    pub amount: i64,
    pub currency_code: String,
    pub formatted_price: String,
}

/// An editorial review attached to an item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EditorialReview {
    pub source: String,
    pub content: String,
}

/// A category node, optionally chaining to its parent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BrowseNode {
    pub browse_node_id: String,
    pub name: String,
    ancestors: Option<Ancestors>,
}

impl BrowseNode {
    /// Returns the immediate parent node, when the response carries one.
    pub fn ancestor(&self) -> Option<&BrowseNode> {
        self.ancestors.as_ref().map(|ancestors| ancestors.browse_node.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Ancestors {
    #[serde(rename = "BrowseNode", default)]
    browse_node: Box<BrowseNode>,
}

/// Error document returned with non-200 statuses. The root tag varies by
/// operation, so only the content shape matters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct ErrorDocument {
    error: ErrorBody,
    request_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct ErrorBody {
    code: String,
    message: String,
}
