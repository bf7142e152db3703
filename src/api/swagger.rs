use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contact Pilot API",
        version = "1.0.0",
        description = "Contact management API. \n\n**Authentication:** `GET /api/users` matches email and password in cleartext; there is no token or session layer.\n\n**Features:**\n- User lookup and upsert by email\n- Contact CRUD scoped by owner (`userId`)\n- Sorted listings (name, email, newest first, 10 most recent)\n- Spreadsheet export"
    ),
    paths(
        // Health
        crate::api::health::welcome,
        crate::api::health::health_check,

        // Users
        crate::api::users::get_user_by_credentials,
        crate::api::users::get_user,
        crate::api::users::save_user,

        // Contacts
        crate::api::contacts::list_contacts,
        crate::api::contacts::list_recent,
        crate::api::contacts::list_by_name,
        crate::api::contacts::list_by_date,
        crate::api::contacts::list_by_email,
        crate::api::contacts::download_contacts,
        crate::api::contacts::find_by_name,
        crate::api::contacts::get_contact,
        crate::api::contacts::create_contact,
        crate::api::contacts::replace_contact,
        crate::api::contacts::delete_contact,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::database::InsertResult,
            crate::database::UpdateResult,
            crate::database::DeleteResult,
        )
    ),
    tags(
        (name = "Health", description = "Welcome banner and health check."),
        (name = "Users", description = "User lookup by credentials or id, and upsert by email."),
        (name = "Contacts", description = "Owner-scoped contact listings, CRUD by id and spreadsheet export."),
    )
)]
pub struct ApiDoc;
