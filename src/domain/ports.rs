use crate::domain::fault::ProviderResult;
use crate::domain::model::{Coordinate, Place, Region, StoreRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
}

/// Lists the places that belong to a region.
#[async_trait]
pub trait RegionDirectory: Send + Sync {
    async fn list_places(&self, region: &Region) -> ProviderResult<Vec<Place>>;
}

/// Resolves a place to coordinates. A place without a usable candidate
/// yields a `NotFound` fault.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, place: &Place, region: &Region) -> ProviderResult<Coordinate>;
}

/// Finds stores around a coordinate, within the provider's own radius.
#[async_trait]
pub trait StoreFinder: Send + Sync {
    async fn find_nearby(&self, coordinate: &Coordinate) -> ProviderResult<Vec<StoreRecord>>;
}

/// Throttle applied after each place that made it into the report.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pace(&self);
}
