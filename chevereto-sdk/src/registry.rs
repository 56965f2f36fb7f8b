// ABOUTME: Immutable registry of known public Chevereto mirrors
// ABOUTME: Built once at startup and handed to the diagnostic runner by value

use crate::endpoint::Endpoint;
use crate::error::UploadError;

/// Upload URL and API key of every public mirror shipped with the SDK.
pub const BUILTIN_MIRRORS: &[(&str, &str)] = &[
    ("http://ultraimg.com/api/1/upload", "3374fa58c672fcaad8dab979f7687397"),
    ("http://yukle.at/api/1/upload", "ee24aee90bcd24e39cead57c65044bde"),
    ("http://img.patifile.com/api/1/upload", "8320784a9b044510e8c723fb778fe3b7"),
    ("http://boltimg.com/api/1/upload", "8dfbcb7ab9b5258a90be7cf09e361894"),
    ("http://snapie.net/myapi/1/upload", "aff7bd5bf65b7e30b675a430049894b3"),
    ("http://picgur.org/api/1/upload", "0a65553c54cf72127d11281f96518469"),
    ("https://pixr.co/api/1/upload", "8fff10a8b0d2852c4167db53aa590e94"),
    ("https://sexr.co/api/1/upload", "46b9aa05ec994098c4b6f18b5eed5e36"),
    ("http://lightpics.net/api/1/upload", "7c6238e8f24c19454315d5dc812d4b93"),
    ("http://imgfly.me/api/1/upload", "c6133147592983996b65dda51ba70255"),
    ("http://imgpinas.com/api/1/upload", "7153eeee787ccbb4b01bea44ec0e699e"),
    ("http://imu.gr/api/1/upload", "a8e5fcfb79df9be675a6aa0a1541a89e"),
    ("http://www.upsieutoc.com/api/1/upload", "c692ca0925f8da5990e8c795602bf942"),
    ("http://www.storemypic.com/api/1/upload", "995269492c2a19902715d5cc3ed810fa"),
    ("http://i.tlthings.net/api/1/upload", "a7yk23ty0k13ralyh32p64hx22p7ek49tt"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
}

impl EndpointRegistry {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }

    /// Builds a registry from raw `(upload_url, api_key)` pairs, rejecting any
    /// pair with an empty value.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, UploadError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let endpoints = pairs
            .into_iter()
            .map(|(url, key)| Endpoint::new(url, key))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(endpoints))
    }

    pub fn builtin() -> Result<Self, UploadError> {
        Self::from_pairs(BUILTIN_MIRRORS.iter().copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Finds a mirror by its display label (host name), case insensitively.
    pub fn find(&self, label: &str) -> Option<&Endpoint> {
        let label = label.trim().to_ascii_lowercase();
        let label = label.strip_prefix("www.").unwrap_or(&label);
        self.endpoints
            .iter()
            .find(|endpoint| endpoint.host_name().to_ascii_lowercase() == label)
    }
}

impl<'a> IntoIterator for &'a EndpointRegistry {
    type Item = &'a Endpoint;
    type IntoIter = std::slice::Iter<'a, Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.iter()
    }
}
