//! Every shipped layout must build and describe the expected shape.

use datev_core::Category;
use datev_formats::builtin_table;

#[test]
fn test_every_factory_builds() {
    let table = builtin_table();
    assert_eq!(table.len(), 2);

    for module in table.modules() {
        let meta = (module.meta_factory().unwrap())().unwrap();
        assert_eq!(meta.version(), module.version());
        assert!(meta.is_consistent(), "{:?}", meta.consistency_problems());

        for factory in module.format_factories() {
            let def = factory().unwrap();
            assert_eq!(def.version(), module.version());
        }
    }
}

#[test]
fn test_booking_batch_700_has_125_fields() {
    let table = builtin_table();
    let module = table.get(700).unwrap();
    let booking = module
        .format_factories()
        .iter()
        .map(|f| f().unwrap())
        .find(|d| d.category() == Category::BookingBatch)
        .unwrap();

    assert_eq!(booking.field_count(), 125);
    assert_eq!(booking.field_at(1).unwrap().label, "Umsatz (ohne Soll/Haben-Kz)");
    assert_eq!(booking.field_at(125).unwrap().label, "Abw. Skontokonto");
    assert!(booking.is_valid_field_value("umsatz", "1234,56"));
    assert!(!booking.is_valid_field_value("umsatz", "1234.56"));
    assert!(booking.is_valid_field_value("belegdatum", "3112"));
    assert!(!booking.is_valid_field_value("belegdatum", "3213"));
    assert!(booking.field("buchungstext").unwrap().quote_value);
    assert!(!booking.field("konto").unwrap().quote_value);
}

#[test]
fn test_meta_700_defaults() {
    let table = builtin_table();
    let meta = (table.get(700).unwrap().meta_factory().unwrap())().unwrap();
    assert_eq!(meta.count_fields(), 31);
    assert_eq!(meta.default_value("kennzeichen"), Some("EXTF"));
    assert_eq!(meta.default_value("versionsnummer"), Some("700"));
    assert_eq!(meta.default_value("wkz"), Some("EUR"));
    assert_eq!(meta.default_value("berater"), None);
}

#[test]
fn test_legacy_module_registers_two_formats() {
    let table = builtin_table();
    let module = table.get(510).unwrap();
    let categories: Vec<Category> = module
        .format_factories()
        .iter()
        .map(|f| f().unwrap().category())
        .collect();
    assert_eq!(categories, vec![Category::BookingBatch, Category::AccountLabels]);
}
