// ABOUTME: Centralized constants for the Chevereto SDK
// ABOUTME: Contains wire field names, timeouts, URL defaults and diagnostic naming rules

/// Multipart form fields understood by the Chevereto upload API
pub mod form {
    /// Field carrying the static API key
    pub const KEY_FIELD: &str = "key";

    /// Field selecting the response encoding
    pub const FORMAT_FIELD: &str = "format";

    /// Only response encoding this SDK understands
    pub const FORMAT_JSON: &str = "json";

    /// File field holding the image payload
    pub const SOURCE_FIELD: &str = "source";
}

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for a single upload request
    pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);
}

/// URL handling defaults
pub mod urls {
    /// Scheme prepended to upload URLs that carry none
    pub const DEFAULT_SCHEME: &str = "http://";

    /// Prefixes accepted as already carrying a scheme
    pub const KNOWN_SCHEMES: &[&str] = &["http://", "https://"];

    /// User agent sent with every upload
    pub const USER_AGENT: &str = concat!("chevereto-sdk/", env!("CARGO_PKG_VERSION"));
}

/// Diagnostic run settings
pub mod diagnostics {
    /// Length of the random stem used for probe file names
    pub const FILE_NAME_LENGTH: usize = 10;

    /// Extension appended to probe file names
    pub const FILE_NAME_EXTENSION: &str = "png";
}
