pub mod club_api;
pub mod descriptions;

pub use club_api::ClubApiProvider;
pub use descriptions::CmsDescriptionProvider;
