//! Project records consumed by the window manager
//!
//! The site keeps its content in a static portfolio JSON file. Only the
//! `projects` array matters here; every other key is ignored.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{FolioError, FolioResult};

/// One portfolio project, owned by the site's static content
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable identifier (numeric ids in the content file become strings)
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Deployed site shown inside the window
    #[serde(default)]
    pub url: String,
    /// Thumbnail used by the card and the minimized tray tile
    #[serde(default)]
    pub image_src: String,
    #[serde(default)]
    pub description: String,
}

impl Project {
    /// True when the project can be shown in a window or a new tab
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// The slice of the portfolio file the viewer reads
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Portfolio {
    /// Parse the portfolio JSON file
    pub fn from_json(json: &str) -> FolioResult<Self> {
        serde_json::from_str(json).map_err(|e| FolioError::Content(e.to_string()))
    }

    /// Look up a project by id
    pub fn project(&self, id: &str) -> FolioResult<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| FolioError::ProjectNotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORTFOLIO: &str = r#"{
        "name": "Jane Doe",
        "headerTaglineOne": "Hello",
        "projects": [
            {
                "id": 1,
                "title": "Atlas",
                "url": "https://atlas.example.com",
                "imageSrc": "/images/atlas.png",
                "description": "Map explorer"
            },
            {
                "id": "ledger",
                "title": "Ledger",
                "imageSrc": "/images/ledger.png"
            }
        ],
        "services": []
    }"#;

    #[test]
    fn test_parse_portfolio() {
        let portfolio = Portfolio::from_json(PORTFOLIO).unwrap();
        assert_eq!(portfolio.projects.len(), 2);

        let atlas = portfolio.project("1").unwrap();
        assert_eq!(atlas.title, "Atlas");
        assert_eq!(atlas.image_src, "/images/atlas.png");
        assert!(atlas.has_url());

        let ledger = portfolio.project("ledger").unwrap();
        assert!(!ledger.has_url());
        assert_eq!(ledger.description, "");
    }

    #[test]
    fn test_missing_project() {
        let portfolio = Portfolio::from_json(PORTFOLIO).unwrap();
        assert_eq!(
            portfolio.project("nope"),
            Err(FolioError::ProjectNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_untitled_project_keeps_portfolio() {
        let json = r#"{
            "projects": [
                { "id": 7, "url": "https://seven.example.com" },
                { "id": 8, "title": "Eight" }
            ]
        }"#;
        let portfolio = Portfolio::from_json(json).unwrap();
        assert_eq!(portfolio.projects.len(), 2);
        assert_eq!(portfolio.project("7").unwrap().title, "");
        assert_eq!(portfolio.project("8").unwrap().title, "Eight");
    }

    #[test]
    fn test_invalid_json() {
        let err = Portfolio::from_json("{ projects: ").unwrap_err();
        assert!(matches!(err, FolioError::Content(_)));
    }
}
