use std::path::PathBuf;

use hyperswitch_masking::PeekInterface;
use wxpay_client::{
    app,
    configs::Config,
    logger::config::LogFormat,
};

mod common;

#[test]
fn test_config_accepts_gateway_field_names() {
    let file = common::config_file(
        r#"
[common]
environment = "development"

[merchant]
appid = "wx2421b1c4370ec43b"
mch_id = "10000100"
mch_key = "192006250b4c09247ec02edce69f6a2d"
"#,
    );

    let config = Config::new_with_config_path(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(config.merchant.app_id, common::APP_ID);
    assert_eq!(config.merchant.merchant_id, common::MCH_ID);
    assert_eq!(config.merchant.merchant_key.peek(), common::MERCHANT_KEY);
}

#[test]
fn test_config_accepts_camel_case_field_names() {
    let file = common::config_file(
        r#"
[common]
environment = "production"

[merchant]
appId = "wx2421b1c4370ec43b"
merchantId = "10000100"
merchantKey = "192006250b4c09247ec02edce69f6a2d"
"#,
    );

    let config = Config::new_with_config_path(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(config.merchant.app_id, common::APP_ID);
    assert_eq!(config.merchant.merchant_id, common::MCH_ID);
    assert_eq!(config.merchant.merchant_key.peek(), common::MERCHANT_KEY);
}

#[test]
fn test_config_defaults_for_optional_sections() {
    let file = common::config_file(
        r#"
[common]
environment = "development"

[merchant]
app_id = "wx2421b1c4370ec43b"
merchant_id = "10000100"
"#,
    );

    let config = Config::new_with_config_path(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(config.gateway.base_url, "https://api.mch.weixin.qq.com");
    assert_eq!(config.gateway.timeout_secs, 30);
    assert!(config.gateway.client_identity_pem.is_none());
    assert!(config.log.console.enabled);
    assert_eq!(config.log.console.log_format, LogFormat::Default);
    assert_eq!(config.log.console.level.into_level(), tracing::Level::INFO);
    assert!(config.merchant.merchant_key.peek().is_empty());
}

#[test]
fn test_config_reads_log_and_gateway_sections() {
    let file = common::config_file(
        r#"
[common]
environment = "development"

[log.console]
level = "debug"
log_format = "json"

[merchant]
app_id = "wx2421b1c4370ec43b"
merchant_id = "10000100"
merchant_key = "k"

[gateway]
base_url = "https://api.mch.weixin.qq.com/sandboxnew"
timeout_secs = 5
"#,
    );

    let config = Config::new_with_config_path(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(config.log.console.level.into_level(), tracing::Level::DEBUG);
    assert_eq!(config.log.console.log_format, LogFormat::Json);
    assert_eq!(
        config.gateway.base_url,
        "https://api.mch.weixin.qq.com/sandboxnew"
    );
    assert_eq!(config.gateway.timeout_secs, 5);
}

#[test]
fn test_config_rejects_unknown_environment() {
    let file = common::config_file(
        r#"
[common]
environment = "staging"

[merchant]
app_id = "wx2421b1c4370ec43b"
merchant_id = "10000100"
"#,
    );

    assert!(Config::new_with_config_path(Some(file.path().to_path_buf())).is_err());
}

#[test]
fn test_config_missing_merchant_section_fails() {
    let file = common::config_file(
        r#"
[common]
environment = "development"
"#,
    );

    assert!(Config::new_with_config_path(Some(file.path().to_path_buf())).is_err());
}

#[test]
fn test_client_builder_rejects_blank_identity() {
    let file = common::config_file(
        r#"
[common]
environment = "development"

[merchant]
app_id = "  "
merchant_id = "10000100"
merchant_key = "k"
"#,
    );

    let config = Config::new_with_config_path(Some(file.path().to_path_buf())).unwrap();
    assert!(app::client_builder(&config).is_err());
}

#[test]
fn test_client_builder_uses_configured_endpoints() {
    let file = common::config_file(
        r#"
[common]
environment = "development"

[merchant]
app_id = "wx2421b1c4370ec43b"
merchant_id = "10000100"
merchant_key = "192006250b4c09247ec02edce69f6a2d"

[gateway]
base_url = "https://api.mch.weixin.qq.com/sandboxnew/"
"#,
    );

    let config = Config::new_with_config_path(Some(file.path().to_path_buf())).unwrap();
    let client = app::client_builder(&config).unwrap();
    assert_eq!(client.identity().app_id(), common::APP_ID);
    assert_eq!(
        client
            .endpoints()
            .url_for(domain_types::types::GatewayAction::Refund),
        "https://api.mch.weixin.qq.com/sandboxnew/secapi/pay/refund"
    );
}

#[test]
fn test_client_builder_reports_missing_identity_file() {
    let file = common::config_file(
        r#"
[common]
environment = "development"

[merchant]
app_id = "wx2421b1c4370ec43b"
merchant_id = "10000100"
merchant_key = "k"
"#,
    );

    let mut config = Config::new_with_config_path(Some(file.path().to_path_buf())).unwrap();
    config.gateway.client_identity_pem = Some(PathBuf::from("/nonexistent/apiclient.pem"));
    assert!(app::client_builder(&config).is_err());
}
