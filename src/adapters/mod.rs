// Adapters layer: concrete implementations of the domain ports (HTTP providers, storage).

pub mod http;
pub mod ibge;
pub mod nominatim;
pub mod storage;
pub mod vivo;

pub use http::HttpSettings;
pub use ibge::IbgeDirectory;
pub use nominatim::NominatimGeocoder;
pub use storage::LocalStorage;
pub use vivo::VivoStoreLocator;
