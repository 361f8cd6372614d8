//! Lesson package catalog records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchasable lesson package.
///
/// Catalog maintenance is an external concern; the core reads packages to
/// resolve the instrument snapshotted into salary slip line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Lesson duration in minutes.
    pub duration: u32,
    /// Package price in rupiah.
    pub price: i64,
    /// Number of lessons included in the package.
    pub session_count: u32,
    pub instrument: String,
}
