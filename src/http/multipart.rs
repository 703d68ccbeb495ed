// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Multipart form payloads
//!
//! reqwest's `multipart::Form` is neither `Clone` nor inspectable, so requests
//! carry this description and the transport converts it at send time.

use bytes::Bytes;

use crate::error::{Error, Result};

/// A multipart form
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<Part>,
}

/// A single named part
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub content: PartContent,
}

/// Part content
#[derive(Debug, Clone)]
pub enum PartContent {
    Text(String),
    File {
        data: Bytes,
        file_name: Option<String>,
        mime: Option<String>,
    },
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part {
            name: name.into(),
            content: PartContent::Text(value.into()),
        });
        self
    }

    /// Add a file field
    pub fn file(
        mut self,
        name: impl Into<String>,
        data: impl Into<Bytes>,
        file_name: Option<String>,
        mime: Option<String>,
    ) -> Self {
        self.parts.push(Part {
            name: name.into(),
            content: PartContent::File {
                data: data.into(),
                file_name,
                mime,
            },
        });
        self
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Convert into a reqwest form
    pub(crate) fn to_reqwest(&self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for part in &self.parts {
            form = match &part.content {
                PartContent::Text(value) => form.text(part.name.clone(), value.clone()),
                PartContent::File {
                    data,
                    file_name,
                    mime,
                } => {
                    let mut p = reqwest::multipart::Part::bytes(data.to_vec());
                    if let Some(file_name) = file_name {
                        p = p.file_name(file_name.clone());
                    }
                    if let Some(mime) = mime {
                        p = p.mime_str(mime).map_err(|e| {
                            Error::other(format!("invalid mime type '{}': {}", mime, e))
                        })?;
                    }
                    form.part(part.name.clone(), p)
                }
            };
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_parts() {
        let form = MultipartForm::new()
            .text("name", "Alice")
            .file("avatar", Bytes::from_static(b"\x89PNG"), Some("a.png".into()), Some("image/png".into()));

        assert_eq!(form.len(), 2);
        assert_eq!(form.parts()[0].name, "name");
        assert!(form.to_reqwest().is_ok());
    }

    #[test]
    fn test_invalid_mime() {
        let form = MultipartForm::new().file("f", Bytes::new(), None, Some("not a mime".into()));
        assert!(form.to_reqwest().is_err());
    }
}
