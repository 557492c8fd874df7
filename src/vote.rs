//! Asking friends to pick between two products
//!
//! Builds the feed messages shared to the messenger and tallies the answers.
//! Delivering the message is left to the messenger SDK.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Furniture;

/// Products a vote compares
pub const MAX_CHOICES: usize = 2;

pub const SITE_URL: &str = "https://kakao-homes.com";

const VOTE_QUESTION: &str = "Which design do you like better?";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoteError {
    #[error("pick exactly two products to start a vote ({selected} picked)")]
    WrongChoiceCount { selected: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub web_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_web_url: Option<String>,
}

impl Link {
    /// Same page on desktop and mobile
    pub fn page(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            mobile_web_url: Some(url.clone()),
            web_url: url,
        }
    }

    pub fn web(url: impl Into<String>) -> Self {
        Self {
            web_url: url.into(),
            mobile_web_url: None,
        }
    }
}

/// A finished design to show off
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareContent {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteOption {
    pub title: String,
    pub image_url: String,
}

impl From<&Furniture> for VoteOption {
    fn from(item: &Furniture) -> Self {
        Self {
            title: item.name.clone(),
            image_url: item.image_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteContent {
    pub title: String,
    pub option_a: VoteOption,
    pub option_b: VoteOption,
}

impl VoteContent {
    pub fn from_products(title: impl Into<String>, [a, b]: [&Furniture; MAX_CHOICES]) -> Self {
        Self {
            title: title.into(),
            option_a: a.into(),
            option_b: b.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Feed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContent {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub link: Link,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    pub link: Link,
}

/// Feed message in the shape the messenger's share API takes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplate {
    pub object_type: ObjectType,
    pub content: TemplateContent,
    pub buttons: Vec<Button>,
}

impl MessageTemplate {
    /// One card linking to the design
    pub fn share(share: &ShareContent) -> Self {
        Self {
            object_type: ObjectType::Feed,
            content: TemplateContent {
                title: share.title.clone(),
                description: share.description.clone(),
                image_url: share.image_url.clone(),
                link: share.link.clone(),
            },
            buttons: vec![Button {
                title: "View details".to_string(),
                link: share.link.clone(),
            }],
        }
    }

    /// Card showing option A with one button per option
    pub fn vote(vote: &VoteContent) -> Self {
        Self {
            object_type: ObjectType::Feed,
            content: TemplateContent {
                title: vote.title.clone(),
                description: VOTE_QUESTION.to_string(),
                image_url: vote.option_a.image_url.clone(),
                link: Link::page(SITE_URL),
            },
            buttons: vec![
                Button {
                    title: "Vote for A".to_string(),
                    link: Link::web(format!("{SITE_URL}/vote/a")),
                },
                Button {
                    title: "Vote for B".to_string(),
                    link: Link::web(format!("{SITE_URL}/vote/b")),
                },
            ],
        }
    }
}

/// Products picked for a vote, in the order they were picked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteSelection {
    ids: Vec<String>,
}

impl VoteSelection {
    /// Pick or unpick a product. A third pick is refused.
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|i| i == id) {
            self.ids.remove(pos);
            return true;
        }
        if self.ids.len() >= MAX_CHOICES {
            log::debug!("Product {} ignored, {} already picked", id, MAX_CHOICES);
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    /// A fresh recommendation drops earlier picks
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// The picked products, in catalogue order
    pub fn choices<'a>(
        &self,
        products: &'a [Furniture],
    ) -> Result<[&'a Furniture; MAX_CHOICES], VoteError> {
        let picked: Vec<&Furniture> = products.iter().filter(|p| self.contains(&p.id)).collect();
        match picked[..] {
            [a, b] => Ok([a, b]),
            _ => Err(VoteError::WrongChoiceCount {
                selected: picked.len(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    A,
    B,
}

/// Answers collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoteResult {
    pub option_a: u32,
    pub option_b: u32,
    pub voters: Vec<String>,
}

impl VoteResult {
    pub fn total(&self) -> u64 {
        u64::from(self.option_a) + u64::from(self.option_b)
    }

    /// Share of each option in whole percent, rounded half up for A with B
    /// taking the rest. Both are zero before anyone voted.
    pub fn percentages(&self) -> (u8, u8) {
        let total = self.total();
        if total == 0 {
            return (0, 0);
        }
        let a = (u64::from(self.option_a) * 100 + total / 2) / total;
        // a <= 100
        let a = a as u8;
        (a, 100 - a)
    }

    pub fn leader(&self) -> Option<Choice> {
        match self.option_a.cmp(&self.option_b) {
            std::cmp::Ordering::Greater => Some(Choice::A),
            std::cmp::Ordering::Less => Some(Choice::B),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn record(&mut self, voter: impl Into<String>, choice: Choice) {
        match choice {
            Choice::A => self.option_a += 1,
            Choice::B => self.option_b += 1,
        }
        self.voters.push(voter.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_catalog;

    #[test]
    fn test_share_template() {
        let share = ShareContent {
            title: "Cozy studio".to_string(),
            description: "Monthly rent makeover".to_string(),
            image_url: "https://cdn.example/room.png".to_string(),
            link: Link::page("https://kakao-homes.com/p/1"),
        };
        let template = MessageTemplate::share(&share);
        assert_eq!(template.buttons.len(), 1);
        assert_eq!(template.buttons[0].link, share.link);

        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["objectType"], "feed");
        assert_eq!(json["content"]["imageUrl"], "https://cdn.example/room.png");
        assert_eq!(
            json["content"]["link"]["mobileWebUrl"],
            "https://kakao-homes.com/p/1"
        );
    }

    #[test]
    fn test_vote_template_has_a_and_b_buttons() {
        let catalog = sample_catalog();
        let vote = VoteContent::from_products("Which shelf?", [&catalog[0], &catalog[3]]);
        let template = MessageTemplate::vote(&vote);

        assert_eq!(template.content.description, VOTE_QUESTION);
        assert_eq!(template.content.image_url, catalog[0].image_url);
        let urls: Vec<&str> = template
            .buttons
            .iter()
            .map(|b| b.link.web_url.as_str())
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://kakao-homes.com/vote/a",
                "https://kakao-homes.com/vote/b"
            ]
        );

        let json = serde_json::to_value(&template).unwrap();
        assert!(json["buttons"][0]["link"].get("mobileWebUrl").is_none());
    }

    #[test]
    fn test_selection_caps_at_two() {
        let mut selection = VoteSelection::default();
        assert!(selection.toggle("1"));
        assert!(selection.toggle("4"));
        assert!(!selection.toggle("5"));
        assert_eq!(selection.ids(), ["1", "4"]);

        assert!(selection.toggle("1"));
        assert!(selection.toggle("5"));
        assert_eq!(selection.ids(), ["4", "5"]);
    }

    #[test]
    fn test_choices_need_exactly_two() {
        let catalog = sample_catalog();
        let mut selection = VoteSelection::default();
        selection.toggle("5");
        assert_eq!(
            selection.choices(&catalog),
            Err(VoteError::WrongChoiceCount { selected: 1 })
        );

        selection.toggle("2");
        let [a, b] = selection.choices(&catalog).unwrap();
        assert_eq!((a.id.as_str(), b.id.as_str()), ("2", "5"));

        selection.clear();
        assert!(selection.choices(&catalog).is_err());
    }

    #[test]
    fn test_unknown_ids_do_not_count() {
        let catalog = sample_catalog();
        let mut selection = VoteSelection::default();
        selection.toggle("1");
        selection.toggle("99");
        assert_eq!(
            selection.choices(&catalog),
            Err(VoteError::WrongChoiceCount { selected: 1 })
        );
    }

    #[test]
    fn test_percentages() {
        let result = VoteResult {
            option_a: 12,
            option_b: 8,
            voters: vec![],
        };
        assert_eq!(result.percentages(), (60, 40));
        assert_eq!(result.leader(), Some(Choice::A));

        let thirds = VoteResult {
            option_a: 1,
            option_b: 2,
            voters: vec![],
        };
        assert_eq!(thirds.percentages(), (33, 67));

        let half = VoteResult {
            option_a: 1,
            option_b: 7,
            voters: vec![],
        };
        // 12.5 rounds up
        assert_eq!(half.percentages(), (13, 87));
    }

    #[test]
    fn test_empty_tally() {
        let mut result = VoteResult::default();
        assert_eq!(result.percentages(), (0, 0));
        assert_eq!(result.leader(), None);

        result.record("jimin", Choice::B);
        assert_eq!(result.percentages(), (0, 100));
        assert_eq!(result.voters, vec!["jimin"]);
    }

    #[test]
    fn test_result_from_server_json() {
        let result: VoteResult =
            serde_json::from_str(r#"{"optionA": 5, "optionB": 15, "voters": ["sua"]}"#).unwrap();
        assert_eq!(result.total(), 20);
        assert_eq!(result.percentages(), (25, 75));
        assert_eq!(result.leader(), Some(Choice::B));
    }
}
