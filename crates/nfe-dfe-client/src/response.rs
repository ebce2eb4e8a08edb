// crates/nfe-dfe-client/src/response.rs
// ============================================================================
// Module: Distribution Response Parsing
// Description: SOAP response parsing and docZip decompression into summaries.
// Purpose: Extract cursors and per-document summaries, tolerating bad documents.
// Dependencies: roxmltree, flate2, base64, nfe-dfe-core, tracing
// ============================================================================

//! ## Overview
//! A distribution response nests `Body` → operation response → operation
//! result → `retDistDFeInt`; each missing level yields its own diagnostic so
//! the endpoint-fallback loop can report which mirror returned what. The
//! authority payload carries status, two pagination cursors, and zero or
//! more `docZip` elements, each a base64-encoded DEFLATE-compressed XML
//! document. Partial success is the expected failure mode at the document
//! level: a docZip that fails to decode or parse is logged and skipped, never
//! fatal, because one corrupt document must not discard the batch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::read::GzDecoder;
use flate2::read::ZlibDecoder;
use nfe_dfe_core::DistributionError;
use nfe_dfe_core::DistributionResult;
use nfe_dfe_core::DocumentSummary;
use nfe_dfe_core::EMPTY_NSU;
use nfe_dfe_core::normalize_tax_id;
use nfe_dfe_core::parse_decimal;
use nfe_dfe_core::parse_instant;
use roxmltree::Document;
use roxmltree::Node;
use tracing::warn;

use crate::payload::NFE_NAMESPACE;
use crate::payload::SOAP_NAMESPACE;
use crate::payload::WSDL_NAMESPACE;

// ============================================================================
// SECTION: Response Parsing
// ============================================================================

/// Parses a raw SOAP response body into a [`DistributionResult`].
///
/// # Errors
///
/// Returns [`DistributionError::MalformedResponse`] when the body is not
/// well-formed XML or any expected nesting level is missing; each missing
/// level produces a distinct message.
pub fn parse_response(content: &[u8]) -> Result<DistributionResult, DistributionError> {
    let text = std::str::from_utf8(content)
        .map_err(|_| malformed("response is not valid UTF-8"))?;
    let doc =
        Document::parse(text).map_err(|_| malformed("response is not well-formed XML"))?;

    let body = element_child(doc.root_element(), SOAP_NAMESPACE, "Body")
        .ok_or_else(|| malformed("SOAP Body is missing"))?;
    let operation = element_child(body, WSDL_NAMESPACE, "nfeDistDFeInteresseResponse")
        .ok_or_else(|| malformed("operation response element is missing"))?;
    let result = element_child(operation, WSDL_NAMESPACE, "nfeDistDFeInteresseResult")
        .ok_or_else(|| malformed("operation result element is missing"))?;
    let ret = element_child(result, NFE_NAMESPACE, "retDistDFeInt")
        .ok_or_else(|| malformed("retDistDFeInt element is missing"))?;

    let mut documents = Vec::new();
    for doczip in ret.descendants().filter(|n| n.has_tag_name((NFE_NAMESPACE, "docZip"))) {
        let nsu = doczip.attribute("NSU").unwrap_or_default().to_string();
        let schema = doczip.attribute("schema").unwrap_or_default().to_string();
        let embedded = match decode_document(doczip.text().unwrap_or_default()) {
            Ok(xml) => xml,
            Err(reason) => {
                warn!(nsu = %nsu, schema = %schema, reason, "skipping docZip that failed to decode");
                continue;
            }
        };
        match summarize_document(&embedded, nsu, schema) {
            Ok(summary) => documents.push(summary),
            Err((nsu, schema, reason)) => {
                warn!(nsu = %nsu, schema = %schema, reason, "skipping docZip that failed to parse");
            }
        }
    }

    Ok(DistributionResult {
        status_code: child_text(ret, "cStat").unwrap_or_default(),
        status_message: child_text(ret, "xMotivo").unwrap_or_default(),
        last_nsu: child_text(ret, "ultNSU").unwrap_or_else(|| EMPTY_NSU.to_string()),
        max_nsu: child_text(ret, "maxNSU").unwrap_or_else(|| EMPTY_NSU.to_string()),
        documents,
    })
}

// ============================================================================
// SECTION: Document Decompression
// ============================================================================

/// Decodes one docZip body: base64, then zlib or gzip decompression, with a
/// plain-XML fallback for bodies the mirror forgot to compress.
fn decode_document(encoded: &str) -> Result<String, &'static str> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let raw = BASE64.decode(compact).map_err(|_| "invalid base64")?;

    let mut inflated = Vec::new();
    if ZlibDecoder::new(raw.as_slice()).read_to_end(&mut inflated).is_err() {
        inflated.clear();
        if GzDecoder::new(raw.as_slice()).read_to_end(&mut inflated).is_err() {
            // Fallback when the body is already plain XML.
            inflated = raw;
        }
    }
    String::from_utf8(inflated).map_err(|_| "document is not valid UTF-8")
}

// ============================================================================
// SECTION: Document Summaries
// ============================================================================

/// Converts one decompressed embedded document into a summary.
///
/// The original XML is kept verbatim in `raw_xml`; extraction of the parsed
/// fields is tolerant (absent or unparseable fields become empty or `None`).
fn summarize_document(
    xml: &str,
    nsu: String,
    schema: String,
) -> Result<DocumentSummary, (String, String, &'static str)> {
    let Ok(doc) = Document::parse(xml) else {
        return Err((nsu, schema, "embedded document is not well-formed XML"));
    };
    let root = doc.root_element();
    let issue_raw = field_text(root, "dhEmi").or_else(|| field_text(root, "dEmi"));
    Ok(DocumentSummary {
        document_type: root.tag_name().name().to_string(),
        access_key: field_text(root, "chNFe").unwrap_or_default(),
        issuer_tax_id: field_text(root, "CNPJ")
            .map(|raw| normalize_tax_id(&raw))
            .unwrap_or_default(),
        issuer_name: field_text(root, "xNome").unwrap_or_default(),
        issue_datetime: issue_raw.as_deref().and_then(parse_instant),
        authorization_datetime: field_text(root, "dhRecbto")
            .as_deref()
            .and_then(parse_instant),
        total_value: field_text(root, "vNF").as_deref().and_then(parse_decimal),
        raw_xml: xml.to_string(),
        nsu,
        schema,
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the typed malformed-response error.
fn malformed(reason: &str) -> DistributionError {
    DistributionError::MalformedResponse(reason.to_string())
}

/// Finds a direct element child by namespace and local name.
fn element_child<'a>(
    parent: Node<'a, 'a>,
    namespace: &str,
    name: &str,
) -> Option<Node<'a, 'a>> {
    parent.children().find(|n| n.has_tag_name((namespace, name)))
}

/// Text of a direct authority-namespace child, trimmed; `None` when absent
/// or blank.
fn child_text(parent: Node<'_, '_>, name: &str) -> Option<String> {
    element_child(parent, NFE_NAMESPACE, name)
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}

/// Text of the first authority-namespace descendant with `name`, anywhere in
/// the embedded document.
fn field_text(root: Node<'_, '_>, name: &str) -> Option<String> {
    root.descendants()
        .find(|n| n.has_tag_name((NFE_NAMESPACE, name)))
        .and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}
