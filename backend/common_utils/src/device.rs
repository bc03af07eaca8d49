//! Host derived `device_info` for refund requests

use once_cell::sync::Lazy;

use crate::consts::{MAX_DEVICE_INFO_LENGTH, UNKNOWN_DEVICE_INFO};

static DEVICE_INFO: Lazy<String> = Lazy::new(|| {
    let hostname = gethostname::gethostname();
    let device_info = device_info_from_hostname(hostname.to_str());
    if device_info == UNKNOWN_DEVICE_INFO {
        tracing::warn!("Host name unavailable, sending placeholder device info");
    }
    device_info
});

/// Device info for this process, resolved once.
pub fn device_info() -> &'static str {
    DEVICE_INFO.as_str()
}

/// Host name capped to the gateway's field length, or the placeholder when missing.
pub fn device_info_from_hostname(hostname: Option<&str>) -> String {
    match hostname.map(str::trim) {
        Some(name) if !name.is_empty() => name.chars().take(MAX_DEVICE_INFO_LENGTH).collect(),
        _ => UNKNOWN_DEVICE_INFO.to_string(),
    }
}
