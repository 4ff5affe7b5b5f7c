mod browse;
mod feature;
mod permission;
mod state;

pub use self::browse::{Asset, Component, Repository};
pub use self::feature::{DEFAULT_WEIGHT, Feature, Mode, ViewSpec};
pub use self::permission::Permission;
pub use self::state::{DEFAULT_EDITION, ServerState, UserInfo};
