use std::sync::Arc;

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::{
    error::Result,
    models::employee::{Company, CreateCompanyRequest},
    store::Store,
};

pub async fn list(State(store): State<Arc<dyn Store>>) -> Result<Json<Vec<Company>>> {
    Ok(Json(store.list_companies().await?))
}

pub async fn create(
    State(store): State<Arc<dyn Store>>,
    Json(req): Json<CreateCompanyRequest>,
) -> Result<Json<Company>> {
    use validator::Validate;
    req.validate()?;

    let company = Company {
        id: Uuid::new_v4(),
        name: req.name,
        tax_id: req.tax_id,
    };
    store.upsert_company(&company).await?;

    Ok(Json(company))
}
