//! Furniture recommendations constrained by budget, tenure and taste

use serde::Serialize;

use crate::profile::{BUDGET_UNIT_WON, Mood, ResidenceType, UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Storage,
    Lighting,
    Furniture,
    Fabric,
}

impl Category {
    /// Order in which a bundle is filled
    pub const BUNDLE_ORDER: [Category; 4] = [
        Category::Storage,
        Category::Lighting,
        Category::Furniture,
        Category::Fabric,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Furniture {
    pub id: String,
    pub name: String,
    /// Price in won
    pub price: u64,
    pub category: Category,
    pub tags: Vec<Mood>,
    /// Installs without drilling
    pub is_removable: bool,
    pub image_url: String,
}

impl Furniture {
    fn sample(
        id: &str,
        name: &str,
        price: u64,
        category: Category,
        tags: &[Mood],
        is_removable: bool,
        image: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            category,
            tags: tags.to_vec(),
            is_removable,
            image_url: format!("https://images.unsplash.com/{image}?w=200&h=200&fit=crop"),
        }
    }
}

/// Built-in catalogue
pub fn sample_catalog() -> Vec<Furniture> {
    vec![
        Furniture::sample(
            "1",
            "No-drill wall shelf, 3 tier",
            45_000,
            Category::Storage,
            &[Mood::Minimal, Mood::Modern],
            true,
            "photo-1598300042247-d088f8ab3a91",
        ),
        Furniture::sample(
            "2",
            "Adhesive LED light",
            25_000,
            Category::Lighting,
            &[Mood::Modern, Mood::Cozy],
            true,
            "photo-1507473885765-e6ed057f782c",
        ),
        Furniture::sample(
            "3",
            "Wooden desk set",
            180_000,
            Category::Furniture,
            &[Mood::Wood, Mood::Natural],
            false,
            "photo-1518455027359-f3f8164ba6bd",
        ),
        Furniture::sample(
            "4",
            "Minimal clothes rack",
            89_000,
            Category::Storage,
            &[Mood::Minimal, Mood::Modern],
            true,
            "photo-1558997519-83ea9252edf8",
        ),
        Furniture::sample(
            "5",
            "Vintage rug",
            75_000,
            Category::Fabric,
            &[Mood::Vintage, Mood::Cozy],
            true,
            "photo-1600166898405-da9535204843",
        ),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub residence_type: ResidenceType,
    /// In units of 10,000 KRW
    pub budget: u32,
    pub moods: Vec<Mood>,
}

impl FilterOptions {
    /// Options from a persona; `None` until a residence type is set
    pub fn from_profile(profile: &UserProfile) -> Option<Self> {
        Some(Self {
            residence_type: profile.residence_type?,
            budget: profile.budget,
            moods: profile.moods.clone(),
        })
    }

    pub fn budget_won(&self) -> u64 {
        u64::from(self.budget) * BUDGET_UNIT_WON
    }

    fn accepts(&self, item: &Furniture) -> bool {
        if item.price > self.budget_won() {
            return false;
        }
        // Monthly renters cannot drill
        if self.residence_type == ResidenceType::Monthly && !item.is_removable {
            return false;
        }
        self.moods.is_empty() || item.tags.iter().any(|t| self.moods.contains(t))
    }
}

/// Items within budget that suit the residence type and share a mood
pub fn filter_furniture<'a>(catalog: &'a [Furniture], options: &FilterOptions) -> Vec<&'a Furniture> {
    catalog.iter().filter(|item| options.accepts(item)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle<'a> {
    pub items: Vec<&'a Furniture>,
    pub total_price: u64,
}

/// At most one item per category, in category order, while the running
/// total stays within budget
pub fn furniture_bundle<'a>(catalog: &'a [Furniture], options: &FilterOptions) -> Bundle<'a> {
    let filtered = filter_furniture(catalog, options);
    let budget = options.budget_won();
    let mut items = Vec::new();
    let mut total_price = 0;

    for category in Category::BUNDLE_ORDER {
        if let Some(item) = filtered
            .iter()
            .find(|f| f.category == category && total_price + f.price <= budget)
        {
            total_price += item.price;
            items.push(*item);
        }
    }

    log::debug!(
        "Bundle for {} / {} won: {} item(s), {} won",
        options.residence_type,
        budget,
        items.len(),
        total_price
    );
    Bundle { items, total_price }
}

pub fn residence_message(kind: ResidenceType) -> &'static str {
    match kind {
        ResidenceType::Monthly => "Curated around no-drill products for monthly renters",
        ResidenceType::Yearly => "Semi-permanent installations suited to jeonse tenants",
        ResidenceType::Own => "A wide range of products you are free to install",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(residence_type: ResidenceType, budget: u32, moods: &[Mood]) -> FilterOptions {
        FilterOptions {
            residence_type,
            budget,
            moods: moods.to_vec(),
        }
    }

    fn ids(items: &[&Furniture]) -> Vec<String> {
        items.iter().map(|f| f.id.clone()).collect()
    }

    #[test]
    fn test_budget_cap() {
        let catalog = sample_catalog();
        let found = filter_furniture(&catalog, &options(ResidenceType::Own, 5, &[]));
        assert_eq!(ids(&found), vec!["1", "2"]);
    }

    #[test]
    fn test_monthly_renters_get_no_drill_only() {
        let catalog = sample_catalog();
        let found = filter_furniture(&catalog, &options(ResidenceType::Monthly, 100, &[]));
        assert!(found.iter().all(|f| f.is_removable));
        assert!(!ids(&found).contains(&"3".to_string()));

        let owner = filter_furniture(&catalog, &options(ResidenceType::Own, 100, &[]));
        assert!(ids(&owner).contains(&"3".to_string()));
    }

    #[test]
    fn test_mood_must_overlap() {
        let catalog = sample_catalog();
        let found = filter_furniture(&catalog, &options(ResidenceType::Yearly, 100, &[Mood::Vintage]));
        assert_eq!(ids(&found), vec!["5"]);

        let none = filter_furniture(&catalog, &options(ResidenceType::Yearly, 100, &[Mood::Industrial]));
        assert!(none.is_empty());
    }

    #[test]
    fn test_bundle_one_per_category_within_budget() {
        let catalog = sample_catalog();
        let bundle = furniture_bundle(&catalog, &options(ResidenceType::Own, 30, &[]));
        // 45k + 25k + 180k leaves no room for the 75k rug
        assert_eq!(ids(&bundle.items), vec!["1", "2", "3"]);
        assert_eq!(bundle.total_price, 250_000);
        assert!(bundle.total_price <= 300_000);
    }

    #[test]
    fn test_bundle_skips_what_no_longer_fits() {
        let catalog = sample_catalog();
        let bundle = furniture_bundle(&catalog, &options(ResidenceType::Own, 10, &[]));
        assert_eq!(ids(&bundle.items), vec!["1", "2"]);
        assert_eq!(bundle.total_price, 70_000);
    }

    #[test]
    fn test_options_from_profile() {
        let mut profile = UserProfile::default();
        assert!(FilterOptions::from_profile(&profile).is_none());
        profile.residence_type = Some(ResidenceType::Monthly);
        profile.budget = 20;
        let opts = FilterOptions::from_profile(&profile).unwrap();
        assert_eq!(opts.budget_won(), 200_000);
    }

    #[test]
    fn test_residence_messages_differ() {
        let msgs = [
            residence_message(ResidenceType::Monthly),
            residence_message(ResidenceType::Yearly),
            residence_message(ResidenceType::Own),
        ];
        assert_ne!(msgs[0], msgs[1]);
        assert_ne!(msgs[1], msgs[2]);
    }
}
