use serde::Deserialize;

/// Owner scope of the contact listings (`?userId=<user _id hex>`)
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OwnerQuery {
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    pub name: String,
}
