mod common;

use std::path::Path;

use common::*;
use figment::Jail;
use folio::error::{ConfigError, ContentError};
use pretty_assertions::assert_eq;

#[test]
fn content_round_trips_through_json_file() -> anyhow::Result<()> {
    let file = bundled_content_file();
    let loaded = ContentStore::from_json_file(file.path())?;
    assert_eq!(&loaded, ContentStore::builtin());
    Ok(())
}

#[test]
fn content_without_optional_lists_uses_defaults() -> anyhow::Result<()> {
    let mut value = serde_json::to_value(ContentStore::builtin())?;
    let object = value.as_object_mut().expect("content is an object");
    object.remove("training");
    object.remove("companies");
    object.remove("resume");
    let file = temp_file(".json", &value.to_string());

    let loaded = ContentStore::from_json_file(file.path())?;
    assert!(loaded.training.is_empty());
    assert!(loaded.companies.is_empty());
    assert_eq!(loaded.resume, "/resume.pdf");
    Ok(())
}

#[test]
fn malformed_content_reports_path() {
    let file = temp_file(".json", "{ \"personal\": ");
    let err = ContentStore::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, ContentError::Parse { ref path, .. } if path == file.path()));
}

#[test]
fn missing_content_file_is_a_read_error() {
    let err = ContentStore::from_json_file(Path::new("/nonexistent/folio.json")).unwrap_err();
    assert!(matches!(err, ContentError::Read { .. }));
}

#[test]
fn duplicate_ids_in_file_are_rejected() -> anyhow::Result<()> {
    let mut store = ContentStore::builtin().clone();
    store.research.push(store.research[0].clone());
    let file = temp_file(".json", &serde_json::to_string(&store)?);

    let err = ContentStore::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, ContentError::DuplicateId { list: "research", .. }));
    Ok(())
}

#[test]
fn explicit_config_file_is_layered_under_env() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
            [reveal]
            threshold = 0.25

            [dropdown]
            hide_delay_ms = 250

            [ambient]
            seed = 7
            graphics = "unavailable"
            "#,
        )?;
        jail.set_env("FOLIO_DROPDOWN__GAP", "4");

        let config = FolioConfig::load(Some(Path::new("custom.toml"))).expect("config loads");
        assert_eq!(config.reveal.threshold, 0.25);
        assert_eq!(config.dropdown.hide_delay_ms, 250);
        assert_eq!(config.dropdown.gap, 4.0);
        assert_eq!(config.ambient.seed, Some(7));
        assert_eq!(config.ambient.graphics, GraphicsSupport::Unavailable);
        assert_eq!(config.layout.mobile_breakpoint, 768.0);
        Ok(())
    });
}

#[test]
fn negative_gap_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("FOLIO_DROPDOWN__GAP", "-1");
        let err = FolioConfig::load(None).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "dropdown.gap"
        ));
        Ok(())
    });
}

#[test]
fn custom_breakpoint_drives_the_page() {
    let mut config = test_config();
    config.layout.mobile_breakpoint = 1024.0;
    let page = make_page(config, (1000.0, 800.0));
    assert!(page.breakpoint().is_mobile());
    assert_eq!(page.ambient().particles().len(), 30);
}

#[test]
fn config_reveal_threshold_reaches_the_page() {
    let mut config = test_config();
    config.reveal.threshold = 1.0;
    let page = make_page(config, DESKTOP);
    // 800 of 900 hero pixels are on screen, short of the full section
    assert!(!page.reveal().is_visible(SectionId::Hero));
}
