//! Test diagnostics module functionality

use bms_grammar::{
    bms::{
        BmsError, StrictFlag, default_config, definition::DefinitionTable, lex::TokenStream,
        parse_bms, parse_bms_with_tokens,
    },
    diagnostics::{SimpleSource, ToAriadne, collect_bms_reports, emit_bms_error},
};

fn error_span_fits(error: &BmsError, source: &str) -> bool {
    match error {
        BmsError::Lex(error) => error.end() <= source.len(),
        BmsError::Parse(error) => error.end() <= source.len(),
        _ => true,
    }
}

fn render(name: &str, source: &str, error: &BmsError) -> String {
    let report = error.to_report(&SimpleSource::new(name, source));
    let mut rendered = Vec::new();
    report
        .write((name.to_string(), ariadne::Source::from(source)), &mut rendered)
        .unwrap();
    String::from_utf8_lossy(&rendered).into_owned()
}

#[test]
fn test_simple_source_creation() {
    let source_text = "#TITLE Test Song\n#ARTIST Test Composer\n#BPM 120\n";
    let source = SimpleSource::new("test.bms", source_text);

    assert_eq!(source.text(), source_text);
    assert_eq!(source.name(), "test.bms");
}

#[test]
fn test_emit_lex_error() {
    let bms_source = "#TITLE Test Song\n#ARTIST Composer\n#INVALID_COMMAND test\n";
    let error = parse_bms(bms_source, &default_config()).unwrap_err();
    assert!(matches!(error, BmsError::Lex(_)));

    emit_bms_error("test.bms", bms_source, &error);
}

#[test]
fn test_emit_duplicates() {
    let bms_source = "#TITLE a\n#TITLE b\n";
    let config = default_config().strict(StrictFlag::DuplicateDefinition);
    let error = parse_bms(bms_source, &config).unwrap_err();
    assert!(matches!(error, BmsError::Duplicate(_)));

    emit_bms_error("test.bms", bms_source, &error);
}

#[test]
fn test_collect_reports() {
    let sources = ["#PLAYER 4\n", "#00111:zz\n", "  #WAVXX x\n"];
    let errors: Vec<BmsError> = sources
        .iter()
        .map(|source| parse_bms(source, &default_config()).unwrap_err())
        .collect();
    let reports: Vec<_> = sources
        .iter()
        .zip(&errors)
        .flat_map(|(source, error)| collect_bms_reports("test.bms", source, [error]))
        .collect();
    assert_eq!(reports.len(), 3);

    for (source, error) in sources.iter().zip(&errors) {
        assert!(error_span_fits(error, source), "{error:?}");
        let rendered = render("test.bms", source, error);
        assert!(rendered.contains("lex error"), "{rendered}");
    }
}

#[test]
fn test_rendered_report_mentions_error() {
    let bms_source = "#TITLE ok\n#RANK 9\n";
    let error = parse_bms(bms_source, &default_config()).unwrap_err();

    let rendered = render("test.bms", bms_source, &error);
    assert!(rendered.contains("lex error"), "{rendered}");
    assert!(rendered.contains("test.bms"), "{rendered}");
}

#[test]
fn test_rendered_parse_error() {
    let table: DefinitionTable = "stagefile#text".parse().unwrap();
    let bms_source = "#STAGEFILE title.bmp\n";
    let grammar = default_config().definitions(&table).grammar();
    let tokens = TokenStream::parse_lex(bms_source, &grammar).unwrap();
    let error = parse_bms_with_tokens(&tokens, &default_config()).unwrap_err();
    assert!(matches!(error, BmsError::Parse(_)));

    let rendered = render("test.bms", bms_source, &error);
    assert!(rendered.contains("parse error"), "{rendered}");
    assert!(rendered.contains("stagefile"), "{rendered}");
}
