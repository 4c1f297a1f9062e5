use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::ProductCreate;
use crate::storage::{LocalStore, StorageError};

pub const THEME_KEY: &str = "theme";
pub const USERNAME_KEY: &str = "username";
pub const LIKES_KEY: &str = "likes";
pub const PRODUCT_DRAFT_KEY: &str = "product_draft";
pub const SELLER_VERIFIED_KEY: &str = "seller_verified";
pub const LUNO_POINTS_KEY: &str = "luno_points";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Typed accessors for the keys the app keeps on the device.
impl LocalStore {
    pub fn theme(&self) -> Result<Theme, StorageError> {
        Ok(self.get(THEME_KEY)?.unwrap_or_default())
    }

    pub async fn set_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.set(THEME_KEY, &theme).await
    }

    pub async fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        let theme = self.theme()?.toggled();
        self.set_theme(theme).await?;
        Ok(theme)
    }

    pub fn username(&self) -> Result<Option<String>, StorageError> {
        self.get(USERNAME_KEY)
    }

    pub async fn set_username(&mut self, username: &str) -> Result<(), StorageError> {
        self.set(USERNAME_KEY, username.trim()).await
    }

    pub fn likes(&self) -> Result<BTreeMap<String, u32>, StorageError> {
        Ok(self.get(LIKES_KEY)?.unwrap_or_default())
    }

    pub fn like_count(&self, product_id: &str) -> Result<u32, StorageError> {
        Ok(self.likes()?.get(product_id).copied().unwrap_or(0))
    }

    /// Adds one like and returns the new count.
    pub async fn like(&mut self, product_id: &str) -> Result<u32, StorageError> {
        let mut likes = self.likes()?;
        let count = likes.entry(product_id.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        let count = *count;
        self.set(LIKES_KEY, &likes).await?;
        Ok(count)
    }

    pub async fn save_product_draft(&mut self, draft: &ProductCreate) -> Result<(), StorageError> {
        self.set(PRODUCT_DRAFT_KEY, draft).await
    }

    pub fn product_draft(&self) -> Result<Option<ProductCreate>, StorageError> {
        self.get(PRODUCT_DRAFT_KEY)
    }

    pub async fn clear_product_draft(&mut self) -> Result<bool, StorageError> {
        self.remove(PRODUCT_DRAFT_KEY).await
    }

    pub fn seller_verified(&self) -> Result<bool, StorageError> {
        Ok(self.get(SELLER_VERIFIED_KEY)?.unwrap_or(false))
    }

    pub async fn set_seller_verified(&mut self, verified: bool) -> Result<(), StorageError> {
        info!(verified, "Seller verification updated");
        self.set(SELLER_VERIFIED_KEY, &verified).await
    }

    pub fn luno_points(&self) -> Result<u64, StorageError> {
        Ok(self.get(LUNO_POINTS_KEY)?.unwrap_or(0))
    }

    /// Returns the new balance.
    pub async fn add_points(&mut self, points: u64) -> Result<u64, StorageError> {
        let total = self.luno_points()?.saturating_add(points);
        self.set(LUNO_POINTS_KEY, &total).await?;
        Ok(total)
    }
}
