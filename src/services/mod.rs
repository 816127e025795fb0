pub mod codes;
pub mod mapping_service;
pub mod sport_config_service;
pub mod sport_service;
pub mod tenant_service;

pub use mapping_service::MappingService;
pub use sport_config_service::SportConfigService;
pub use sport_service::SportService;
pub use tenant_service::TenantService;
