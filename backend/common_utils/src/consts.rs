//! Consolidated constants for the WeChat Pay adapter

// =============================================================================
// ID Generation and Length Constants
// =============================================================================

/// Length of the nonce sent with every gateway request
pub const NONCE_LENGTH: usize = 32;

/// Characters to use for generating NanoID
pub(crate) const ALPHABETS: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

/// Prefix used for order numbers when the caller does not pick one
pub const DEFAULT_TRADE_NO_PREFIX: &str = "WX";
/// Prefix used for generated refund numbers
pub const REFUND_NO_PREFIX: &str = "WR";
/// Channel marker placed between the timestamp and the random suffix
pub const TRADE_NO_CHANNEL: &str = "01";
/// Upper bound (inclusive) of each random draw in a trade number
pub const TRADE_NO_RANDOM_MAX: u64 = 1 << 20;
/// Width of each base-36 random suffix
pub const TRADE_NO_RANDOM_WIDTH: usize = 3;
/// Width of each timestamp component
pub const TRADE_NO_TIME_COMPONENT_WIDTH: usize = 2;

// =============================================================================
// Device info
// =============================================================================

/// Maximum length the gateway accepts for `device_info`
pub const MAX_DEVICE_INFO_LENGTH: usize = 32;
/// Sent as `device_info` when the host name is unavailable
pub const UNKNOWN_DEVICE_INFO: &str = "UNKNOWN";

// =============================================================================
// Date formats
// =============================================================================

/// `YYYYMMDDHHmmss`, the gateway's wire format for `time_start`/`time_expire`
pub const GATEWAY_DATETIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Default payment window for a newly created order
pub const ORDER_EXPIRY_MILLIS: i64 = 900_000;
