use std::sync::Arc;

use models::errors::ModelError;
use models::{Comment, NewShop, ObjectId, ShopRecord};
use tracing::{debug, info, instrument, warn};

use crate::errors::ServiceError;
use crate::shops::comment_ledger::{self, CommentDraft};
use crate::shops::domain::{AuthorProfile, CasOutcome, SortKey, Versioned};
use crate::shops::like_set;
use crate::shops::repository::ShopRepository;
use crate::shops::review_aggregator;

/// Shop store configuration
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Extra attempts after a compare-and-swap loses to a concurrent writer.
    pub max_retries: u32,
}

impl Default for StoreConfig {
    fn default() -> Self { Self { max_retries: 5 } }
}

/// Orchestrates load → validate → mutate → compare-and-swap for shop records.
///
/// Every mutation reads the record with its version, applies a pure
/// transformation, recomputes the review aggregate and writes back only if the
/// version is unchanged. A lost race re-runs the whole cycle against the fresh
/// record, so domain checks (duplicate like, authorship) see the latest state.
pub struct ShopStore<R: ShopRepository + ?Sized> {
    repo: Arc<R>,
    cfg: StoreConfig,
}

fn parse_id(raw: &str, entity: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse(raw).map_err(|_| ServiceError::not_found(entity))
}

fn invalid_input(e: ModelError) -> ServiceError {
    match e {
        ModelError::Validation(msg) => ServiceError::Validation(msg),
        other => ServiceError::Model(other),
    }
}

impl<R: ShopRepository + ?Sized> ShopStore<R> {
    pub fn new(repo: Arc<R>, cfg: StoreConfig) -> Self { Self { repo, cfg } }

    /// Create a shop owned by `owner`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::shops::{ShopStore, StoreConfig, repository::memory::InMemoryShopRepository};
    /// use models::NewShop;
    /// let store = ShopStore::new(Arc::new(InMemoryShopRepository::new()), StoreConfig::default());
    /// let shop = tokio_test::block_on(store.create("user-1", NewShop { name: "Corner Cafe".into(), ..Default::default() })).unwrap();
    /// assert_eq!(shop.owner_user, "user-1");
    /// assert_eq!(shop.total_review, 0);
    /// ```
    #[instrument(skip(self, owner, input), fields(owner = %owner))]
    pub async fn create(&self, owner: &str, input: NewShop) -> Result<ShopRecord, ServiceError> {
        let shop = ShopRecord::create(owner, input).map_err(invalid_input)?;
        let stored = self.repo.insert(&shop).await?;
        info!(shop_id = %stored.value.id, "shop_created");
        Ok(stored.value)
    }

    /// All shops ordered by `sort_key` (`highest`, `lowest`, `most`, `least`);
    /// ties keep newest first.
    #[instrument(skip(self))]
    pub async fn list(&self, sort_key: &str) -> Result<Vec<ShopRecord>, ServiceError> {
        let key: SortKey = sort_key.parse()?;
        let mut shops = self.repo.list().await?;
        shops.iter_mut().for_each(review_aggregator::apply);
        shops.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        match key {
            SortKey::Highest => shops.sort_by(|a, b| b.average_review.total_cmp(&a.average_review)),
            SortKey::Lowest => shops.sort_by(|a, b| a.average_review.total_cmp(&b.average_review)),
            SortKey::Most => shops.sort_by(|a, b| b.total_review.cmp(&a.total_review)),
            SortKey::Least => shops.sort_by(|a, b| a.total_review.cmp(&b.total_review)),
        }
        debug!(count = shops.len(), "shops_listed");
        Ok(shops)
    }

    /// Read one shop. The aggregate is refreshed for the response only.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<ShopRecord, ServiceError> {
        let id = parse_id(id, "shop")?;
        let mut shop = self.load(&id).await?.value;
        review_aggregator::apply(&mut shop);
        Ok(shop)
    }

    /// Delete a shop; only its owner may.
    #[instrument(skip(self, caller), fields(caller = %caller))]
    pub async fn delete(&self, id: &str, caller: &str) -> Result<ObjectId, ServiceError> {
        let id = parse_id(id, "shop")?;
        for attempt in 0..=self.cfg.max_retries {
            let current = self.load(&id).await?;
            if current.value.owner_user != caller {
                return Err(ServiceError::Unauthorized("only the owner may delete this shop".into()));
            }
            match self.repo.delete(&id, current.version).await? {
                CasOutcome::Applied(_) => {
                    info!(shop_id = %id, "shop_deleted");
                    return Ok(id);
                }
                CasOutcome::Stale => debug!(shop_id = %id, attempt, "delete raced a writer; retrying"),
            }
        }
        warn!(shop_id = %id, retries = self.cfg.max_retries, "delete gave up after version conflicts");
        Err(ServiceError::Conflict("concurrent update, retry".into()))
    }

    #[instrument(skip(self, caller), fields(caller = %caller))]
    pub async fn like(&self, id: &str, caller: &str) -> Result<Vec<String>, ServiceError> {
        let id = parse_id(id, "shop")?;
        let likes = self
            .mutate(&id, |shop| {
                like_set::add(&mut shop.likes, caller)?;
                Ok(shop.likes.clone())
            })
            .await?;
        info!(shop_id = %id, likes = likes.len(), "shop_liked");
        Ok(likes)
    }

    #[instrument(skip(self, caller), fields(caller = %caller))]
    pub async fn unlike(&self, id: &str, caller: &str) -> Result<Vec<String>, ServiceError> {
        let id = parse_id(id, "shop")?;
        let likes = self
            .mutate(&id, |shop| {
                like_set::remove(&mut shop.likes, caller)?;
                Ok(shop.likes.clone())
            })
            .await?;
        info!(shop_id = %id, likes = likes.len(), "shop_unliked");
        Ok(likes)
    }

    /// Add a comment; `review` must parse as a number. Returns the ledger, newest first.
    #[instrument(skip(self, author, text), fields(caller = %author.user_id))]
    pub async fn add_comment(
        &self,
        id: &str,
        author: &AuthorProfile,
        text: &str,
        review: &str,
    ) -> Result<Vec<Comment>, ServiceError> {
        let id = parse_id(id, "shop")?;
        let draft = CommentDraft::parse(text, review)?;
        let comments = self
            .mutate(&id, |shop| {
                comment_ledger::add(&mut shop.comments, author, &draft);
                Ok(shop.comments.clone())
            })
            .await?;
        info!(shop_id = %id, review = draft.review(), total = comments.len(), "comment_added");
        Ok(comments)
    }

    /// Remove a comment; only its author may.
    #[instrument(skip(self, caller), fields(caller = %caller))]
    pub async fn remove_comment(&self, id: &str, comment_id: &str, caller: &str) -> Result<Vec<Comment>, ServiceError> {
        let id = parse_id(id, "shop")?;
        let comment_id = parse_id(comment_id, "comment")?;
        let comments = self
            .mutate(&id, |shop| {
                comment_ledger::remove(&mut shop.comments, &comment_id, caller)?;
                Ok(shop.comments.clone())
            })
            .await?;
        info!(shop_id = %id, %comment_id, "comment_removed");
        Ok(comments)
    }

    async fn load(&self, id: &ObjectId) -> Result<Versioned<ShopRecord>, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("shop"))
    }

    /// Read-modify-write with compare-and-swap and bounded retries.
    async fn mutate<T, F>(&self, id: &ObjectId, mut apply: F) -> Result<T, ServiceError>
    where
        F: FnMut(&mut ShopRecord) -> Result<T, ServiceError> + Send,
        T: Send,
    {
        for attempt in 0..=self.cfg.max_retries {
            let Versioned { version, value: mut shop } = self.load(id).await?;
            let out = apply(&mut shop)?;
            review_aggregator::apply(&mut shop);
            match self.repo.replace(&shop, version).await? {
                CasOutcome::Applied(new_version) => {
                    debug!(shop_id = %id, new_version, "shop_written");
                    return Ok(out);
                }
                CasOutcome::Stale => debug!(shop_id = %id, attempt, "stale write; retrying"),
            }
        }
        warn!(shop_id = %id, retries = self.cfg.max_retries, "update gave up after version conflicts");
        Err(ServiceError::Conflict("concurrent update, retry".into()))
    }
}
