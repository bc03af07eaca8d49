#![allow(dead_code)]

use std::{io::Write, sync::Mutex};

use common_utils::CustomResult;
use domain_types::{
    connector_types::RequestParameterSet, errors::ConnectorError, types::MerchantIdentity,
};
use hyperswitch_masking::Secret;
use interfaces::api::XmlTransport;
use tempfile::NamedTempFile;

pub const APP_ID: &str = "wx2421b1c4370ec43b";
pub const MCH_ID: &str = "10000100";
pub const MERCHANT_KEY: &str = "192006250b4c09247ec02edce69f6a2d";

/// Records every request and answers with a canned gateway reply.
#[derive(Default)]
pub struct MockTransport {
    pub calls: Mutex<Vec<(String, RequestParameterSet)>>,
}

impl MockTransport {
    pub fn calls(&self) -> Vec<(String, RequestParameterSet)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl XmlTransport for MockTransport {
    type Output = String;

    async fn xml_request(
        &self,
        url: &str,
        params: RequestParameterSet,
    ) -> CustomResult<Self::Output, ConnectorError> {
        self.calls.lock().unwrap().push((url.to_string(), params));
        Ok("<xml><return_code><![CDATA[SUCCESS]]></return_code></xml>".to_string())
    }
}

pub fn identity() -> MerchantIdentity {
    MerchantIdentity::new(APP_ID, MCH_ID, Secret::new(MERCHANT_KEY.to_string())).unwrap()
}

/// Writes `contents` to a temporary `.toml` file kept alive by the returned handle.
pub fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
