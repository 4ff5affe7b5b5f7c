use super::*;

mod drilldown;
pub(super) use drilldown::{BrowseData, DrilldownKind, DrilldownView};

mod feature;
pub(super) use feature::FeatureView;

mod status;
pub(super) use status::StatusView;
