//! Office-defined categories for the vehicles and real-estate forms.

use composer::types::CategoryType;
use tracing::warn;

use crate::backend::UserCategory;
use crate::state::AppState;

/// Categories the signed-in office defined for `category_type`.
///
/// The dropdown is optional, so any failure (signed out, no office, backend
/// error) yields an empty list and a warning instead of an error.
pub async fn load_categories(state: &AppState, category_type: CategoryType) -> Vec<UserCategory> {
    if !category_type.has_transaction_kind() {
        return Vec::new();
    }

    let user = match state.identity.current_user().await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!(%category_type, "categories skipped: not signed in");
            return Vec::new();
        }
        Err(e) => {
            warn!(%category_type, error = %e, "categories skipped: identity lookup failed");
            return Vec::new();
        }
    };
    let office = match state.offices.current_office(&user).await {
        Ok(Some(office)) => office,
        Ok(None) => {
            warn!(%category_type, user_id = %user.id, "categories skipped: no office");
            return Vec::new();
        }
        Err(e) => {
            warn!(%category_type, error = %e, "categories skipped: office lookup failed");
            return Vec::new();
        }
    };

    match state.categories.list_user_categories(office.id, category_type).await {
        Ok(categories) => categories,
        Err(e) => {
            warn!(%category_type, office_id = %office.id, error = %e, "category lookup failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
