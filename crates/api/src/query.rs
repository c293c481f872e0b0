//! Query parameter types for API handlers.

use catmander_db::models::cat::CatFilter;
use serde::Deserialize;

/// Query parameters for `GET /cats` (`?isAdopted=true|false`).
///
/// The snake_case spelling `is_adopted` is accepted as well.
#[derive(Debug, Default, Deserialize)]
pub struct CatListParams {
    #[serde(default, rename = "isAdopted", alias = "is_adopted")]
    pub is_adopted: Option<bool>,
}

impl From<CatListParams> for CatFilter {
    fn from(params: CatListParams) -> Self {
        CatFilter {
            is_adopted: params.is_adopted,
        }
    }
}
