use serde::Deserialize;

/// Query string of `GET /api/users`
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CredentialsQuery {
    pub email: String,
    pub password: String,
}
