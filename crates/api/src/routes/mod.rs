pub mod about;
pub mod admin;
pub mod contact;
pub mod donation;
pub mod donor;
pub mod health;
pub mod project;
pub mod statistics;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                         list, create (admin)
/// /projects/{id}                    get, update, delete (admin)
///
/// /admin/register                   register (public, toggleable)
/// /admin/login                      login (public)
/// /admin/profile                    get, update (admin)
/// /admin/reset-password             change own password (admin)
///
/// /donors/register                  register (public)
/// /donors/login                     login (public)
/// /donors/profile                   get, update (donor)
/// /donors/profile/donations         own donation history (donor)
/// /donors                           list (admin)
/// /donors/{id}                      get (admin)
///
/// /donations                        create (public), list (admin)
/// /donations/settings               get (public), update (admin)
/// /donations/statistics/summary     summary (admin)
/// /donations/{id}                   get (public), delete (admin)
/// /donations/{id}/verify            verify (admin)
///
/// /upload/image                     upload one, delete by publicId (admin)
/// /upload/images                    upload many (admin)
///
/// /statistics/dashboard             dashboard (admin)
/// /statistics/projects              project distribution (public)
/// /statistics/donations             donation analytics (admin)
/// /statistics/donors                donor analytics (admin)
///
/// /contact/settings                 get (public), update (admin)
/// /contact/submit                   submit (public)
/// /contact/messages                 list (admin)
/// /contact/messages/{id}            update status, delete (admin)
///
/// /about                            get (public), update (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/admin", admin::router())
        .nest("/donors", donor::router())
        .nest("/donations", donation::router())
        .nest("/upload", upload::router())
        .nest("/statistics", statistics::router())
        .nest("/contact", contact::router())
        .nest("/about", about::router())
}
