use std::fs;

use avtp_rust::avtp_common_rs::packet::core::layout_spec::{DynamicLayout, LayoutSpec};
use avtp_rust::avtp_common_rs::utils::config_loader::{CodecConfig, ConfigLoader};
use avtp_rust::avtp_common_rs::utils::log_config::LogConfig;
use avtp_rust::prelude::*;
use tempfile::TempDir;

#[test]
fn test_config_save_and_load_json_toml() {
    let dir = TempDir::new().unwrap();
    let config = CodecConfig {
        validation: ValidationPolicy::lenient(),
        logging: LogConfig { level: "debug".into(), show_target: false },
    };

    for name in ["avtp.json", "avtp.toml"] {
        let path = dir.path().join(name);
        ConfigLoader::save_config(&config, &path).unwrap();
        assert_eq!(ConfigLoader::load_from_file(&path).unwrap(), config);
    }
}

#[test]
fn test_loader_picks_first_existing_path() {
    let dir = TempDir::new().unwrap();
    let toml_path = dir.path().join("avtp.toml");
    fs::write(&toml_path, "[validation]\nrequire_stream_id_valid = false\n").unwrap();

    let loader = ConfigLoader::with_paths(vec![dir.path().join("missing.json"), toml_path]);
    let config = loader.load().unwrap();
    assert!(!config.validation.require_stream_id_valid);
    assert!(config.validation.reject_nonzero_reserved);
}

#[test]
fn test_broken_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("avtp.json");
    fs::write(&path, "{\"logging\": {\"level\": 3}}").unwrap();
    assert!(ConfigLoader::with_paths(vec![path]).load().is_err());
}

#[test]
fn test_loaded_policy_drives_validation() {
    let config = ConfigLoader::from_json_str(r#"{"validation": {"reject_nonzero_reserved": false}}"#).unwrap();
    let mut buf = [0u8; 20];
    let mut pdu = MostPdu::init(&mut buf[..]).unwrap();
    pdu.set(MostField::Reserved2, 0xFFFF);
    assert!(pdu.validate().is_err());
    assert!(pdu.validate_with(&config.validation).is_ok());
}

#[test]
fn test_layout_file_matches_compiled_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cvf.json");
    fs::write(&path, LayoutSpec::of::<Cvf>().to_json().unwrap()).unwrap();

    let layout = DynamicLayout::from_json_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(layout.header_len(), 24);
    assert_eq!(layout.name(), "CVF");

    let mut buf = [0u8; 24];
    let mut pdu = CvfPdu::init(&mut buf[..]).unwrap();
    pdu.set_stream_id(0xAABB_CCDD_EEFF_0011);
    pdu.set_evt(0x9);
    assert_eq!(layout.get(&buf, "StreamId").unwrap(), 0xAABB_CCDD_EEFF_0011);
    assert_eq!(layout.get(&buf, "Evt").unwrap(), 0x9);
    assert_eq!(layout.get(&buf, "Subtype").unwrap(), 0x03);
}
