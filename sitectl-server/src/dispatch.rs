//! Query dispatcher: one [`ContentRequest`] in, one query out, one shaped
//! response back.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sitectl_core::lists::decode_list;
use sitectl_core::{
    normalized, Gallery, GallerySummary, Menu, NewsItem, Page, Section, Service, SiteSettings,
    TeamMember, Tip,
};
use thiserror::Error;
use tracing::instrument;

use crate::content::{ContentError, ContentStore, QueryParams};
use crate::queries;
use crate::request::{ContentRequest, PageLookup, RequestError};

/// Everything the endpoint can answer with. Serializes as the bare record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentResponse {
    SiteSettings(Box<SiteSettings>),
    Menu(Option<Menu>),
    Page(Box<Page>),
    Section(Option<Box<Section>>),
    HomeScroll(Value),
    News(Vec<NewsItem>),
    Services(Vec<Service>),
    Team(Vec<TeamMember>),
    Tips(Vec<Tip>),
    Galleries(Vec<GallerySummary>),
    Gallery(Box<Gallery>),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Invalid query parameters: {0}")]
    Request(#[from] RequestError),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error(transparent)]
    Upstream(#[from] ContentError),

    #[error("unexpected {context} shape from content store: {source}")]
    Decode {
        context: &'static str,
        source: serde_json::Error,
    },
}

impl DispatchError {
    fn not_found(resource: &'static str, id: &str) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

fn decode<T: DeserializeOwned>(context: &'static str, value: Value) -> Result<T, DispatchError> {
    serde_json::from_value(value).map_err(|source| DispatchError::Decode { context, source })
}

fn decode_many<T: DeserializeOwned>(
    context: &'static str,
    value: Value,
) -> Result<Vec<T>, DispatchError> {
    decode_list(value).map_err(|source| DispatchError::Decode { context, source })
}

/// Routes typed requests to their query templates
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn ContentStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self), fields(kind = request.kind()))]
    pub async fn dispatch(&self, request: &ContentRequest) -> Result<ContentResponse, DispatchError> {
        let response = match request {
            ContentRequest::SiteSettings => {
                ContentResponse::SiteSettings(Box::new(self.site_settings().await?))
            }
            ContentRequest::Menu { title } => ContentResponse::Menu(self.menu(title).await?),
            ContentRequest::Page { identifier, lookup } => {
                ContentResponse::Page(Box::new(self.page(identifier, *lookup).await?))
            }
            ContentRequest::Section {
                section_type,
                title,
            } => ContentResponse::Section(
                self.section(section_type, title.as_deref()).await?.map(Box::new),
            ),
            ContentRequest::HomeScroll => ContentResponse::HomeScroll(
                self.fetch(queries::SECTION_HOME_SCROLL, QueryParams::new()).await?,
            ),
            ContentRequest::News { limit } => ContentResponse::News(decode_many(
                "news",
                self.fetch(&queries::news(*limit), QueryParams::new()).await?,
            )?),
            ContentRequest::Services => ContentResponse::Services(decode_many(
                "service",
                self.fetch(queries::SERVICES, QueryParams::new()).await?,
            )?),
            ContentRequest::Team => ContentResponse::Team(decode_many(
                "team",
                self.fetch(queries::TEAM, QueryParams::new()).await?,
            )?),
            ContentRequest::Tips => ContentResponse::Tips(decode_many(
                "tips",
                self.fetch(queries::TIPS, QueryParams::new()).await?,
            )?),
            ContentRequest::Galleries => ContentResponse::Galleries(decode_many(
                "galleries",
                self.fetch(queries::GALLERIES, QueryParams::new()).await?,
            )?),
            ContentRequest::Gallery { id } => ContentResponse::Gallery(Box::new(self.gallery(id).await?)),
        };
        Ok(response)
    }

    async fn fetch(&self, query: &str, params: QueryParams) -> Result<Value, DispatchError> {
        Ok(self.store.fetch(query, &params).await?)
    }

    async fn site_settings(&self) -> Result<SiteSettings, DispatchError> {
        let value = self.fetch(queries::SITE_SETTINGS, QueryParams::new()).await?;
        if value.is_null() {
            tracing::warn!("no siteSettings document, answering with empty settings");
            return Ok(SiteSettings::default());
        }
        Ok(normalized(decode::<SiteSettings>("siteSettings", value)?))
    }

    async fn menu(&self, title: &str) -> Result<Option<Menu>, DispatchError> {
        let params = QueryParams::new().with("menuTitle", title);
        let value = self.fetch(queries::MENU_BY_TITLE, params).await?;
        let menu: Option<Menu> = decode("menu", value)?;
        Ok(normalized(menu))
    }

    async fn page(&self, identifier: &str, lookup: PageLookup) -> Result<Page, DispatchError> {
        let query = match lookup {
            PageLookup::Slug => queries::PAGE_BY_SLUG,
            PageLookup::RouteName => queries::PAGE_BY_ROUTE_NAME,
        };
        let params = QueryParams::new().with("identifier", identifier);
        let value = self.fetch(query, params).await?;
        if value.is_null() {
            tracing::warn!(identifier, ?lookup, "no page found");
            return Err(DispatchError::not_found("Page", identifier));
        }
        let page: Page = decode("page", value)?;
        tracing::debug!(identifier, sections = page.sections.len(), "page resolved");
        Ok(page)
    }

    async fn section(
        &self,
        section_type: &str,
        title: Option<&str>,
    ) -> Result<Option<Section>, DispatchError> {
        let mut params = QueryParams::new().with("sectionType", section_type);
        if let Some(title) = title {
            params = params.with("title", title);
        }
        let value = self.fetch(&queries::section(title.is_some()), params).await?;
        decode("section", value)
    }

    async fn gallery(&self, id: &str) -> Result<Gallery, DispatchError> {
        let params = QueryParams::new().with("id", id);
        let value = self.fetch(queries::GALLERY_BY_ID, params).await?;
        if value.is_null() {
            return Err(DispatchError::not_found("Gallery", id));
        }
        decode("gallery", value)
    }
}
