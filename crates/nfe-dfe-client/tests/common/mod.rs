// crates/nfe-dfe-client/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared fixtures for nfe-dfe-client tests.
// Purpose: Generate throwaway A1 bundles, canned SOAP bodies, and local mirrors.
// Dependencies: openssl, base64, flate2, tiny_http, tempfile
// ============================================================================

//! ## Overview
//! Builds self-signed PKCS#12 fixtures in memory, renders canned distribution
//! responses with compressed document payloads, and runs scripted local HTTP
//! mirrors for fallback tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only output and panic-based assertions are permitted; not \
              every integration test uses every shared helper."
)]

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::thread;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::write::GzEncoder;
use flate2::write::ZlibEncoder;
use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::bn::MsbOption;
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkcs12::Pkcs12;
use openssl::pkey::PKey;
use openssl::rsa::Rsa;
use openssl::x509::X509;
use openssl::x509::X509NameBuilder;
use tempfile::NamedTempFile;
use tiny_http::Response;
use tiny_http::Server;
use tiny_http::StatusCode;

/// Password used for every generated test bundle.
pub const TEST_PASSWORD: &str = "fixture-pass";

/// CNPJ used across test queries.
pub const TEST_CNPJ: &str = "12345678000195";

// ============================================================================
// SECTION: Certificate Fixtures
// ============================================================================

/// Generates a self-signed A1 bundle as DER-encoded PKCS#12 bytes.
///
/// The certificate carries `subject_cn` as its common name and is valid from
/// now for one year.
pub fn generate_pkcs12(subject_cn: &str, password: &str) -> Vec<u8> {
    let rsa = Rsa::generate(2048).unwrap();
    let pkey = PKey::from_rsa(rsa).unwrap();

    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_nid(Nid::COMMONNAME, subject_cn).unwrap();
    name.append_entry_by_nid(Nid::ORGANIZATIONNAME, "Fixture Org").unwrap();
    let name = name.build();

    let mut serial = BigNum::new().unwrap();
    serial.rand(96, MsbOption::MAYBE_ZERO, false).unwrap();

    let mut builder = X509::builder().unwrap();
    builder.set_version(2).unwrap();
    builder.set_serial_number(&serial.to_asn1_integer().unwrap()).unwrap();
    builder.set_subject_name(&name).unwrap();
    builder.set_issuer_name(&name).unwrap();
    builder.set_pubkey(&pkey).unwrap();
    builder.set_not_before(&Asn1Time::days_from_now(0).unwrap()).unwrap();
    builder.set_not_after(&Asn1Time::days_from_now(365).unwrap()).unwrap();
    builder.sign(&pkey, MessageDigest::sha256()).unwrap();
    let cert = builder.build();

    Pkcs12::builder()
        .name(subject_cn)
        .pkey(&pkey)
        .cert(&cert)
        .build2(password)
        .unwrap()
        .to_der()
        .unwrap()
}

/// Writes a generated bundle to a temp file and returns the handle keeping
/// the file alive.
pub fn pkcs12_file(subject_cn: &str, password: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&generate_pkcs12(subject_cn, password)).unwrap();
    file.flush().unwrap();
    file
}

// ============================================================================
// SECTION: Response Fixtures
// ============================================================================

/// Encodes one embedded document as zlib-compressed base64, the shape real
/// mirrors emit.
pub fn zlib_doczip(xml: &str) -> String {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(xml.as_bytes()).unwrap();
    STANDARD.encode(encoder.finish().unwrap())
}

/// Encodes one embedded document as gzip-compressed base64.
pub fn gzip_doczip(xml: &str) -> String {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(xml.as_bytes()).unwrap();
    STANDARD.encode(encoder.finish().unwrap())
}

/// Encodes one embedded document as uncompressed base64.
pub fn plain_doczip(xml: &str) -> String {
    STANDARD.encode(xml.as_bytes())
}

/// One `<docZip>` entry for [`soap_response`].
pub struct DocZip {
    /// Value of the NSU attribute.
    pub nsu: &'static str,
    /// Value of the schema attribute.
    pub schema: &'static str,
    /// Pre-encoded element body.
    pub body: String,
}

/// Renders a full SOAP distribution response body.
pub fn soap_response(
    status_code: &str,
    status_message: &str,
    last_nsu: &str,
    max_nsu: &str,
    docs: &[DocZip],
) -> String {
    let mut lote = String::new();
    if !docs.is_empty() {
        lote.push_str("<loteDistDFeInt>");
        for doc in docs {
            lote.push_str(&format!(
                "<docZip NSU=\"{}\" schema=\"{}\">{}</docZip>",
                doc.nsu, doc.schema, doc.body
            ));
        }
        lote.push_str("</loteDistDFeInt>");
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <soap:Envelope xmlns:soap=\"http://www.w3.org/2003/05/soap-envelope\">\
         <soap:Body>\
         <nfeDistDFeInteresseResponse \
         xmlns=\"http://www.portalfiscal.inf.br/nfe/wsdl/NFeDistribuicaoDFe\">\
         <nfeDistDFeInteresseResult>\
         <retDistDFeInt xmlns=\"http://www.portalfiscal.inf.br/nfe\" versao=\"1.01\">\
         <tpAmb>1</tpAmb>\
         <cStat>{status_code}</cStat>\
         <xMotivo>{status_message}</xMotivo>\
         <ultNSU>{last_nsu}</ultNSU>\
         <maxNSU>{max_nsu}</maxNSU>\
         {lote}\
         </retDistDFeInt>\
         </nfeDistDFeInteresseResult>\
         </nfeDistDFeInteresseResponse>\
         </soap:Body>\
         </soap:Envelope>"
    )
}

/// Sample resume document with the full field set.
pub fn sample_resume_xml() -> String {
    "<resNFe xmlns=\"http://www.portalfiscal.inf.br/nfe\" versao=\"1.01\">\
     <chNFe>35240112345678000195550010000000011000000017</chNFe>\
     <CNPJ>12.345.678/0001-95</CNPJ>\
     <xNome>Fornecedor Exemplo LTDA</xNome>\
     <dhEmi>2024-01-05T10:20:30-03:00</dhEmi>\
     <dhRecbto>2024-01-05T10:21:00-03:00</dhRecbto>\
     <vNF>1234.56</vNF>\
     </resNFe>"
        .to_string()
}

/// Sample full authorization protocol document.
pub fn sample_proc_xml() -> String {
    "<procNFe xmlns=\"http://www.portalfiscal.inf.br/nfe\" versao=\"4.00\">\
     <NFe><infNFe><emit>\
     <CNPJ>12345678000195</CNPJ>\
     <xNome>Fornecedor Completo SA</xNome>\
     </emit><ide><dhEmi>2024-02-10T08:00:00-03:00</dhEmi></ide>\
     <total><ICMSTot><vNF>99.90</vNF></ICMSTot></total>\
     </infNFe></NFe>\
     </procNFe>"
        .to_string()
}

// ============================================================================
// SECTION: Local Mirrors
// ============================================================================

/// Local HTTP mirror serving a fixed script of responses and counting hits.
pub struct CannedMirror {
    /// URL the client should target.
    pub url: String,
    /// Number of requests received so far.
    pub hits: Arc<AtomicUsize>,
}

impl CannedMirror {
    /// Spawns a mirror that answers each scripted `(status, body)` pair in
    /// order, then stops accepting.
    pub fn spawn(script: Vec<(u16, String)>) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let url = format!("http://{addr}/ws/NFeDistribuicaoDFe.asmx");
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        thread::spawn(move || {
            for (status, body) in script {
                let Ok(request) = server.recv() else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let response = Response::from_string(body).with_status_code(StatusCode(status));
                let _ = request.respond(response);
            }
        });
        Self {
            url,
            hits,
        }
    }

    /// Requests received so far.
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}
