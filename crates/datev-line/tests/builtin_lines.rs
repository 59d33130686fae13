//! Codec behaviour against the shipped layouts.

use datev_core::Category;
use datev_line::{render_preamble, HeaderLine, LineOptions};
use datev_registry::Registry;

#[test]
fn test_parsed_quoting_survives_rewrite() {
    let registry = Registry::builtin();
    let booking = registry.get_format_definition(Category::BookingBatch, 700).unwrap();
    assert!(booking.field("buchungstext").unwrap().quote_value);

    let mut line = HeaderLine::new(booking);
    line.set_with_quote_info("buchungstext", "Miete Oktober", false).unwrap();
    assert_eq!(line.get("buchungstext"), Some("Miete Oktober"));

    line.set("buchungstext", "Miete Oktober").unwrap();
    assert_eq!(line.get("buchungstext"), Some("\"Miete Oktober\""));
}

#[test]
fn test_parse_then_write_is_byte_identical() {
    let registry = Registry::builtin();
    let labels = registry.get_format_definition(Category::AccountLabels, 700).unwrap();
    let raw = "1200;Bank;\"de-DE\";\"Bank \"\"Nord\"\"; Girokonto\"";

    let line = HeaderLine::parse(labels, raw, LineOptions::default());
    assert_eq!(line.to_line(), raw);
    assert_eq!(line.was_quoted("kontenbeschriftung"), Some(false));
    assert_eq!(
        line.value("kontenbeschriftung_lang").as_deref(),
        Some("Bank \"Nord\"; Girokonto")
    );
}

#[test]
fn test_full_label_row_detects_booking_batch() {
    let registry = Registry::builtin();
    let booking = registry.get_format_definition(Category::BookingBatch, 700).unwrap();
    let debtors = registry
        .get_format_definition(Category::DebtorsCreditors, 700)
        .unwrap();

    let shared = booking.labels().filter(|l| debtors.labels().any(|d| d == *l)).count();
    assert!(shared < 20);

    let raw = HeaderLine::labels(booking.clone(), LineOptions::default()).to_line();
    let line = HeaderLine::parse(booking.clone(), &raw, LineOptions::default());
    let hit = line.detect_format(&[booking.clone(), debtors.clone()]).unwrap();
    assert_eq!(hit.index, 0);
    assert_eq!(hit.category, Category::BookingBatch);
    assert_eq!(hit.score, 125);
    assert!(line.is_compatible_with_enum(&booking));
    assert!(!line.is_compatible_with_enum(&debtors));
}

#[test]
fn test_legacy_row_prefers_its_own_version() {
    let registry = Registry::builtin();
    let current = registry.get_format_definition(Category::BookingBatch, 700).unwrap();
    let legacy = registry.get_format_definition(Category::BookingBatch, 510).unwrap();

    let raw = HeaderLine::labels(legacy.clone(), LineOptions::default()).to_line();
    let line = HeaderLine::parse(legacy.clone(), &raw, LineOptions::default());

    // same score; the 510 layout has no labels left over
    let hit = line.detect_format(&[current, legacy]).unwrap();
    assert_eq!(hit.version, 510);
    assert_eq!(hit.score, 116);
}

#[test]
fn test_booking_values_in_position_order() {
    let registry = Registry::builtin();
    let booking = registry.get_format_definition(Category::BookingBatch, 700).unwrap();
    let line = HeaderLine::from_values(
        booking,
        [
            ("buchungstext", "Büromaterial"),
            ("belegdatum", "0310"),
            ("konto", "4930"),
            ("gegenkonto", "1200"),
            ("soll_haben_kennzeichen", "S"),
            ("umsatz", "119,00"),
        ],
    )
    .unwrap();

    let text = line.to_line();
    assert!(text.starts_with("119,00;\"S\";;;;;4930;1200;;0310;;;;\"Büromaterial\";"));
    assert_eq!(text.matches(';').count(), 124);
}

#[test]
fn test_preamble_for_current_version() {
    let registry = Registry::builtin();
    let meta = registry.get(700).unwrap();
    let line = render_preamble(
        &meta,
        [("formatkategorie", "21"), ("formatname", "Buchungsstapel")],
        &LineOptions::default(),
    )
    .unwrap();

    assert!(line.starts_with("\"EXTF\";700;21;\"Buchungsstapel\";"));
    assert_eq!(line.matches(';').count(), meta.count_fields() - 1);
}

#[test]
fn test_rebuild_parsed_line_field_by_field() {
    let registry = Registry::builtin();
    let labels = registry.get_format_definition(Category::AccountLabels, 700).unwrap();

    // unquoted text carrying enclosures, and an enclosed empty required value
    for raw in ["1200;Bank \"Nord\";\"de-DE\";", "1200;\"\";;Kasse"] {
        let parsed = HeaderLine::parse(labels.clone(), raw, LineOptions::default());
        let mut rebuilt = HeaderLine::new(labels.clone());
        for field in labels.ordered() {
            if let (Some(value), Some(quoted)) = (parsed.value(&field.name), parsed.was_quoted(&field.name)) {
                rebuilt
                    .set_with_quote_info(&field.name, &value, quoted)
                    .unwrap_or_else(|e| panic!("{}: {}", field.name, e));
            }
        }
        assert_eq!(rebuilt.to_line(), raw);
    }
}

#[test]
fn test_unquoted_value_must_stay_one_cell() {
    let registry = Registry::builtin();
    let labels = registry.get_format_definition(Category::AccountLabels, 700).unwrap();
    let mut line = HeaderLine::new(labels);

    assert!(line
        .set_with_quote_info("kontenbeschriftung", "Bank \"Nord; Süd\"", false)
        .is_ok());
    assert!(line
        .set_with_quote_info("kontenbeschriftung", "Bank \"Nord", false)
        .unwrap_err()
        .is_invalid_value());
    assert!(line
        .set_with_quote_info("kontenbeschriftung", "Bank; Nord", false)
        .unwrap_err()
        .is_invalid_value());
}
