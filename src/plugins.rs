//! Plugin contributions assembled by [`crate::context::AppContext::start`].

use crate::model::Feature;
use crate::snippets::Generator;

mod coreui;
pub use self::coreui::{CoreUi, REPOSITORIES_PERMISSION};

pub trait Plugin {
    fn name(&self) -> &str;

    fn features(&self) -> Vec<Feature>;

    fn snippet_generators(&self) -> Vec<(&'static str, Generator)> {
        Vec::new()
    }
}

pub fn default_plugins() -> Vec<Box<dyn Plugin>> {
    vec![Box::new(CoreUi)]
}
