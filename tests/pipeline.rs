use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rinse::{Config, Decoder, DecoderOptions, Detect, Pipeline, Payload};
use rinse_compress::Compression;
use rstest::{fixture, rstest};

#[fixture]
fn pipeline() -> Pipeline {
    Pipeline::default()
}

#[derive(Debug, Default)]
struct Counting(AtomicUsize);
impl Detect for Counting {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn detect(&self, _bytes: &[u8]) -> Option<String> {
        self.0.fetch_add(1, Ordering::Relaxed);
        Some("windows-1252".to_string())
    }
}

struct Response(Option<Vec<u8>>);
impl Payload for Response {
    fn data(&self) -> Option<&[u8]> {
        self.0.as_deref()
    }
}

const PAGE: &str = "<!DOCTYPE html><html><head><title>Grüße</title></head>\
    <body><article><p>Erste Zeile</p><p>Zweite Zeile</p></article></body></html>";

#[test]
fn test_valid_utf8_skips_detectors() {
    let counting = Arc::new(Counting::default());
    let decoder = Decoder::new(&DecoderOptions::default()).with_detectors(vec![counting.clone() as Arc<dyn Detect>]);
    assert_eq!(decoder.decode(PAGE.as_bytes()), PAGE);
    assert_eq!(counting.0.load(Ordering::Relaxed), 0);

    assert_eq!(decoder.decode(b"Gr\xFC\xDFe"), "Grüße");
    assert_eq!(counting.0.load(Ordering::Relaxed), 1);
}

#[rstest]
#[case(&[])]
#[case(&[0xFF, 0xFE, 0xFD])]
#[case(&[0x1F, 0x8B, 0x08, 0x00])]
#[case(&[0x42, 0x5A, 0x68, 0x39, 0x31])]
#[case(&[0x00; 64])]
#[case(b"<meta charset=\"nonsense\"><p>\x80\x81\xFE</p>")]
fn test_decode_never_fails(pipeline: Pipeline, #[case] bytes: &[u8]) {
    let _ = pipeline.decode(bytes);
    let _ = pipeline.load(bytes).unwrap();
}

#[rstest]
fn test_compressed_page_end_to_end(pipeline: Pipeline) {
    let latin1: Vec<u8> = PAGE.chars().map(|c| u8::try_from(u32::from(c)).unwrap()).collect();
    let gzipped = Compression::Gzip.compress(&latin1).unwrap();

    let document = pipeline.load(gzipped.clone()).unwrap().unwrap();
    assert!(document.text().contains("Erste Zeile"));
    assert_eq!(pipeline.decode_response(&Response(Some(gzipped))).as_deref(), Some(PAGE));
}

#[rstest]
fn test_response_without_payload(pipeline: Pipeline) {
    let response = Response(None);
    assert_eq!(pipeline.decode_response(&response), None);
    assert!(pipeline.load(rinse::Input::response(&response)).is_err());
}

#[rstest]
fn test_load_document_is_identity(pipeline: Pipeline) {
    let document = pipeline.load(PAGE).unwrap().unwrap();
    let expected = document.clone();
    assert_eq!(pipeline.load(document).unwrap(), Some(expected));
}

#[rstest]
#[case("<html><body><p>hello</p></body></html>", true)]
#[case("<!doctype html SYSTEM \"about:legacy-compat\"><html><body><p>hi</p></body></html>", true)]
#[case("plain text, no markup", false)]
#[case("<body><p>x</p></body>", false)]
#[case("<!DOCTYPE rss>\n<rss><channel>feed</channel></rss>", false)]
#[case("", false)]
fn test_load(pipeline: Pipeline, #[case] markup: &str, #[case] accepted: bool) {
    let document = pipeline.load(markup).unwrap();
    assert_eq!(document.is_some(), accepted);
    if let Some(document) = document {
        assert!(document.root().descendent_elements().count() >= 2);
    }
}

#[rstest]
fn test_text_fields(pipeline: Pipeline) {
    assert_eq!(pipeline.trim("  a   b\n c "), "a b c");
    assert_eq!(pipeline.trim(""), "");
    assert_eq!(pipeline.normalize_tags("Tech, , AI, \"Tech\""), "Tech, AI, Tech");

    let text = " Erste\u{200B} Zeile\u{7}&nbsp;\r\n\n\u{2029}  Zweite  ";
    let once = pipeline.sanitize(text);
    assert_eq!(once, "Erste Zeile\nZweite");
    assert_eq!(pipeline.sanitize(&once), once);
    pipeline.clear_caches();
    assert_eq!(pipeline.sanitize(text), once);
}

#[rstest]
fn test_authors(pipeline: Pipeline) {
    let authors = pipeline.normalize_authors(None, "Written by John Smith, Jr. on March 5").unwrap();
    assert!(authors.contains("John Smith"));
    assert!(!authors.contains("March"));

    assert_eq!(pipeline.normalize_authors(Some("Jane Doe"), "Jane").as_deref(), Some("Jane Doe"));
    assert_eq!(pipeline.normalize_authors(Some("Jane Doe"), "https://example.org/jane").as_deref(), Some("Jane Doe"));
    assert_eq!(pipeline.normalize_authors(None, "https://example.org/jane"), None);
}

#[test]
fn test_shared_across_threads() {
    let pipeline = Arc::new(Pipeline::from_config(&Config::default()));
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let pipeline = Arc::clone(&pipeline);
            std::thread::spawn(move || pipeline.sanitize(&format!("  worker\u{7}   {n} ")))
        })
        .collect();
    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("worker {n}"));
    }
}
