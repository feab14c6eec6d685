use serde::{Deserialize, Serialize};

/// Starting content for an editing session, as handed over by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,

    /// Card markup
    pub content: String,
}

impl Template {
    pub fn new(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            background_image: None,
            content: content.into(),
        }
    }

    pub fn with_background_image(mut self, url: impl Into<String>) -> Self {
        self.background_image = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_from_catalog_json() {
        let json = r#"{
            "id": "birthday-01",
            "name": "Balloons",
            "backgroundImage": "balloons.jpg",
            "content": "<h1 id=\"block-h1-0\">Party!</h1>"
        }"#;

        let template: Template = serde_json::from_str(json).unwrap();
        assert_eq!(template.id, "birthday-01");
        assert_eq!(template.background_image.as_deref(), Some("balloons.jpg"));
    }

    #[test]
    fn test_background_image_is_optional() {
        let template: Template =
            serde_json::from_str(r#"{ "id": "t", "name": "Plain", "content": "" }"#).unwrap();
        assert!(template.background_image.is_none());
        assert_eq!(template, Template::new("t", "Plain", ""));
    }
}
