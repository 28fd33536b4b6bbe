//! Request descriptors for the gateway.
//!
//! A request is captured as plain data so a 401 recovery can re-send it:
//! `reqwest` request builders are consumed on send, and multipart forms are
//! not cloneable, so the gateway rebuilds the transport request from this
//! descriptor on every attempt instead of mutating an in-flight object.

use reqwest::Method;

/// Body of an outgoing API call.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

/// Captured outgoing call: everything needed to (re)build the transport
/// request. Immutable once constructed; the retry decision is threaded
/// through the gateway as a value, never stamped onto this struct.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }
}

/// Owned multipart description. Holds field values and file bytes so the
/// form can be rebuilt for a retry after token refresh.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<MultipartPart>,
}

#[derive(Debug, Clone)]
enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(MultipartPart::File {
            name: name.into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        });
        self
    }

    /// Build a fresh transport form. The multipart boundary and content-type
    /// are computed by reqwest; the gateway never overrides them.
    pub fn to_form(&self) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new();
        for part in &self.parts {
            form = match part {
                MultipartPart::Text { name, value } => form.text(name.clone(), value.clone()),
                MultipartPart::File {
                    name,
                    file_name,
                    mime,
                    bytes,
                } => {
                    let part = reqwest::multipart::Part::bytes(bytes.clone())
                        .file_name(file_name.clone())
                        .mime_str(mime)
                        .unwrap_or_else(|_| {
                            reqwest::multipart::Part::bytes(bytes.clone())
                                .file_name(file_name.clone())
                        });
                    form.part(name.clone(), part)
                }
            };
        }
        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_accumulate_in_order() {
        let req = ApiRequest::get("/api/media/media/")
            .query("media_type", "audio")
            .query("search", "wayuu");
        assert_eq!(req.query.len(), 2);
        assert_eq!(req.query[0], ("media_type".into(), "audio".into()));
        assert_eq!(req.query[1], ("search".into(), "wayuu".into()));
    }

    #[test]
    fn multipart_form_rebuilds_after_clone() {
        let form = MultipartForm::new()
            .text("title", "Jayeechi")
            .file("file", "song.mp3", "audio/mpeg", vec![1, 2, 3]);
        // Both the original and the clone must still produce a form, since
        // a retried upload rebuilds from the captured descriptor.
        let _ = form.to_form();
        let _ = form.clone().to_form();
    }
}
