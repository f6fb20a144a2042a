//! Admin page registry for the product resource

use catalog_core::ProductId;
use serde::{Deserialize, Serialize};

/// Logical pages of the resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Index,
    Create,
    Edit,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Index, Page::Create, Page::Edit];

    pub fn name(&self) -> &'static str {
        match self {
            Page::Index => "index",
            Page::Create => "create",
            Page::Edit => "edit",
        }
    }

    /// Route pattern relative to the resource slug
    pub fn route(&self) -> &'static str {
        match self {
            Page::Index => "/",
            Page::Create => "/create",
            Page::Edit => "/{record}/edit",
        }
    }
}

/// Registered page with its route pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRoute {
    pub page: Page,
    pub route: String,
}

/// Navigation entry and pages of an admin resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub slug: String,
    pub navigation_icon: String,
    pub pages: Vec<PageRoute>,
}

impl ResourceDescriptor {
    /// Concrete path of a page; `record` fills the `{record}` placeholder
    pub fn url(&self, page: Page, record: Option<ProductId>) -> String {
        let route = page.route();
        let route = match record {
            Some(id) => route.replace("{record}", &id.to_string()),
            None => route.to_string(),
        };

        match route.as_str() {
            "/" => format!("/{}", self.slug),
            _ => format!("/{}{}", self.slug, route),
        }
    }
}

/// The product resource
pub fn product_resource() -> ResourceDescriptor {
    ResourceDescriptor {
        slug: "products".to_string(),
        navigation_icon: "heroicon-o-shopping-bag".to_string(),
        pages: Page::ALL
            .into_iter()
            .map(|page| PageRoute {
                page,
                route: page.route().to_string(),
            })
            .collect(),
    }
}
