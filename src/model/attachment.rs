use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// True iff some attachment has exactly this name and url. No case folding
/// or URL normalization is applied.
pub fn has_matching_attachment(attachments: &[Attachment], name: &str, url: &str) -> bool {
    attachments.iter().any(|a| a.name == name && a.url == url)
}
