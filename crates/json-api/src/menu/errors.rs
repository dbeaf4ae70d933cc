//! Menu Errors

use salvo::http::StatusError;
use tracing::error;

use brewline_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::AlreadyExists => {
            StatusError::conflict().brief("Menu item already exists")
        }
        CatalogServiceError::InvalidReference
        | CatalogServiceError::MissingRequiredData
        | CatalogServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid menu item payload")
        }
        CatalogServiceError::NotFound => StatusError::not_found().brief("Menu item not found"),
        CatalogServiceError::Sql(source) => {
            error!("menu storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
