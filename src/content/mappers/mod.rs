//! Content mappers.
//!
//! Each mapper is a pure function from a raw CMS envelope to one view-model
//! family. Mappers never fail: an absent or unusable payload maps to `None`
//! (or an empty `Vec`), and the page assembler decides what to show instead.

pub mod about;
pub mod banner;
pub mod cards;
pub mod contact;
pub mod dividend;
pub mod leaders;
pub mod news;
pub mod products;

pub use about::map_about_data;
pub use banner::{banner_from_component, map_top_banner_data};
pub use cards::{map_business_segments, map_card_grid, map_community_initiatives};
pub use contact::map_contact_details;
pub use dividend::map_dividend_data;
pub use leaders::{LeaderGroup, map_leaders_data};
pub use news::{
    find_press_release, map_media_kit, map_perspectives, map_press_release, map_press_releases,
};
pub use products::{map_pagination, map_product, map_products};
