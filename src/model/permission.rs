use serde::{Deserialize, Serialize};

/// One backend permission record. Unknown ids are never granted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: String,
    pub permitted: bool,
}

impl Permission {
    pub fn granted(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            permitted: true,
        }
    }

    pub fn denied(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            permitted: false,
        }
    }
}
