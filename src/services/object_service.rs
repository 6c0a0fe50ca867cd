use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::dto::ALL_LABEL;
use crate::dto::object_dto::{GameObject, ObjectCatalog};
use crate::error::CatalogError;
use crate::services::catalog::{fetch_json, matches_query, normalize_query};

pub struct ObjectService {
    client: Client,
    url: String,
    objects: OnceCell<Vec<GameObject>>,
}

impl ObjectService {
    pub fn new(client: Client, url: String) -> Self {
        Self {
            client,
            url,
            objects: OnceCell::new(),
        }
    }

    pub fn with_objects(client: Client, url: String, objects: Vec<GameObject>) -> Self {
        Self {
            objects: OnceCell::new_with(Some(objects)),
            ..Self::new(client, url)
        }
    }

    pub async fn load(&self) -> &[GameObject] {
        let loaded = self
            .objects
            .get_or_try_init(|| async {
                let catalog: ObjectCatalog = fetch_json(&self.client, &self.url).await?;
                info!("Loaded {} objects.", catalog.objects.len());
                Ok::<_, CatalogError>(catalog.objects)
            })
            .await;

        match loaded {
            Ok(objects) => objects,
            Err(e) => {
                error!("Failed to load object catalog: {}", e);
                &[]
            }
        }
    }

    pub fn all(&self) -> &[GameObject] {
        self.objects.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_by_id(&self, id: &str) -> Option<&GameObject> {
        self.all().iter().find(|o| o.id == id)
    }

    pub fn search(&self, query: Option<&str>) -> Vec<&GameObject> {
        self.filtered(None, query)
    }

    /// `None` or the "all" label selects every category.
    pub fn by_category(&self, category: Option<&str>) -> Vec<&GameObject> {
        self.filtered(category, None)
    }

    pub fn filtered(&self, category: Option<&str>, query: Option<&str>) -> Vec<&GameObject> {
        let category = category.map(str::trim).filter(|c| !c.is_empty() && *c != ALL_LABEL);
        let query = normalize_query(query);

        self.all()
            .iter()
            .filter(|o| category.is_none_or(|c| o.category == c))
            .filter(|o| query.as_deref().is_none_or(|q| matches_query(&o.name_kr, q)))
            .collect()
    }

    /// The "all" label followed by each category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_LABEL.to_string()];
        for object in self.all() {
            if !categories.contains(&object.category) {
                categories.push(object.category.clone());
            }
        }
        categories
    }
}
