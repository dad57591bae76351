use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{MarketError, MarketResult};
use crate::marketplace::{Artwork, AuctionId, Registration, UserId};
use crate::traits::MarketStore;

type ArtworkMap = Arc<RwLock<HashMap<AuctionId, Artwork>>>;
type RegistrationMap = Arc<RwLock<HashMap<(AuctionId, UserId), Registration>>>;

/// In-memory artwork and registration store.
///
/// Clones share the same underlying maps. The registration map is keyed by
/// (artwork, user), which is exactly the unique constraint the gate needs.
#[derive(Clone, Default)]
pub struct MemoryStore {
    artworks: ArtworkMap,
    registrations: RegistrationMap,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MarketStore for MemoryStore {
    async fn load_artwork(&self, id: AuctionId) -> MarketResult<Option<Artwork>> {
        Ok(self.artworks.read().await.get(&id).cloned())
    }

    async fn insert_artwork(&self, artwork: Artwork) -> MarketResult<()> {
        self.artworks.write().await.insert(artwork.id, artwork);
        Ok(())
    }

    async fn save_artwork(&self, artwork: &Artwork) -> MarketResult<()> {
        let mut artworks = self.artworks.write().await;
        match artworks.get_mut(&artwork.id) {
            Some(stored) => {
                *stored = artwork.clone();
                Ok(())
            }
            None => Err(MarketError::NotFound(artwork.id)),
        }
    }

    async fn registration(
        &self,
        artwork: AuctionId,
        user: UserId,
    ) -> MarketResult<Option<Registration>> {
        Ok(self
            .registrations
            .read()
            .await
            .get(&(artwork, user))
            .cloned())
    }

    async fn try_insert_registration(&self, registration: Registration) -> MarketResult<bool> {
        let mut registrations = self.registrations.write().await;
        let key = (registration.artwork, registration.user);
        if registrations.contains_key(&key) {
            return Ok(false);
        }
        registrations.insert(key, registration);
        Ok(true)
    }

    async fn save_registration(&self, registration: &Registration) -> MarketResult<()> {
        let mut registrations = self.registrations.write().await;
        let key = (registration.artwork, registration.user);
        match registrations.get_mut(&key) {
            Some(stored) => {
                *stored = registration.clone();
                Ok(())
            }
            None => Err(MarketError::Storage(format!(
                "no registration for user {} on artwork {}",
                registration.user, registration.artwork
            ))),
        }
    }

    async fn registrations_for(&self, artwork: AuctionId) -> MarketResult<Vec<Registration>> {
        let registrations = self.registrations.read().await;
        let mut rows: Vec<Registration> = registrations
            .values()
            .filter(|reg| reg.artwork == artwork)
            .cloned()
            .collect();
        rows.sort_by_key(|reg| reg.registered_at);
        Ok(rows)
    }
}
