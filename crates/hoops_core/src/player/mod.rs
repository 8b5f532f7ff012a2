//! Attribute-mapping support: the position table and the stats -> ratings
//! mapper.

pub mod mapper;
pub mod position_profile;

pub use mapper::AttributeMapper;
pub use position_profile::{position_profile, PositionProfile, POSITION_PROFILES};
