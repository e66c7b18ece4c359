use crate::{
    entities::photo::Photo,
    errors::CatalogError,
    policy::can_view,
    repositories::photo::PhotoRepository,
};

pub struct SearchHandler<P>
where
    P: PhotoRepository,
{
    pub photo_repo: P,
}

impl<P> SearchHandler<P>
where
    P: PhotoRepository,
{
    pub fn new(photo_repo: P) -> Self {
        SearchHandler { photo_repo }
    }

    /// Case-insensitive substring search over title, description and tags.
    ///
    /// A blank query matches nothing. Results never include photos the caller
    /// cannot view, and keep the order the store returned them in.
    pub async fn search(&self, query: &str, acting_user: Option<i64>) -> Result<Vec<Photo>, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let needle = query.to_lowercase();
        let photos: Vec<Photo> = self
            .photo_repo
            .search_photos(query)
            .await?
            .into_iter()
            .filter(|p| p.matches_lowercase(&needle) && can_view(Some(p), acting_user))
            .collect();

        tracing::debug!(results = photos.len(), "Search completed");
        Ok(photos)
    }
}
