pub mod campaign;
pub mod utm_medium;
pub mod utm_source;
pub mod utm_url;

pub use campaign::Entity as CampaignEntity;
pub use utm_medium::Entity as UtmMediumEntity;
pub use utm_source::Entity as UtmSourceEntity;
pub use utm_url::Entity as UtmUrlEntity;
