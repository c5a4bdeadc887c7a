use std::fmt;

use pairio_crypto::CanonicalHasher;
use pairio_types::Digest;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::settings::RemoteSettings;

/// Characters left unescaped in path segments and query values.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Health endpoint exposed by the service.
pub const PROBE_PATH: &str = "/probe";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Get,
    Set,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signed description of a single request.
///
/// Only its digest leaves the process; the service rebuilds the same
/// descriptor from the request and its own copy of the channel password.
#[derive(Clone, Debug)]
pub struct RequestDescriptor<'a> {
    pub action: Action,
    pub collection: &'a str,
    pub key: &'a Digest,
    pub value: Option<&'a str>,
    pub password: &'a str,
}

impl<'a> RequestDescriptor<'a> {
    pub fn get(collection: &'a str, key: &'a Digest, password: &'a str) -> Self {
        Self {
            action: Action::Get,
            collection,
            key,
            value: None,
            password,
        }
    }

    pub fn set(
        collection: &'a str,
        key: &'a Digest,
        value: Option<&'a str>,
        password: &'a str,
    ) -> Self {
        Self {
            action: Action::Set,
            collection,
            key,
            value,
            password,
        }
    }

    /// `{collection, key, name, password, value?}`; `value` only when present.
    pub fn to_value(&self) -> Value {
        let mut obj = json!({
            "collection": self.collection,
            "key": self.key.as_str(),
            "name": self.action.as_str(),
            "password": self.password,
        });
        if let (Some(value), Some(map)) = (self.value, obj.as_object_mut()) {
            map.insert("value".into(), Value::String(value.to_owned()));
        }
        obj
    }

    pub fn signature(&self) -> Digest {
        CanonicalHasher::digest_value(&self.to_value())
    }

    /// Full request URL, signed, with every component percent-encoded.
    pub fn url(&self, settings: &RemoteSettings) -> String {
        let mut url = format!(
            "{}/{}/{}/{}",
            settings.url,
            self.action,
            encode(self.collection),
            self.key
        );
        if let Some(value) = self.value {
            url.push('/');
            url.push_str(&encode(value));
        }
        url.push_str(&format!(
            "?channel={}&signature={}",
            encode(&settings.channel),
            self.signature()
        ));
        url
    }
}

pub fn probe_url(base: &str) -> String {
    format!("{base}{PROBE_PATH}")
}

fn encode(component: &str) -> String {
    utf8_percent_encode(component, COMPONENT).to_string()
}

/// Body of a `get` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GetResponse {
    pub success: bool,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of a `set` or `probe` response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SetResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
