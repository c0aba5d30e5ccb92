use actix_web::{Scope, web};

pub fn routes() -> Scope {
    web::scope("/v1")
        // auth
        .service(super::auth::signup)
        .service(super::auth::login)
        .service(super::auth::logout)
        .service(super::auth::forgot_password)
        .service(super::auth::verify_otp)
        .service(super::auth::set_password)
        // projects (static segments before the {project_id} matcher)
        .service(super::project::search)
        .service(super::project::my_projects)
        .service(super::project::create)
        .service(super::project::detail)
        .service(super::project::delete)
        .service(super::project::complete)
        // applications
        .service(super::application::submit)
        .service(super::application::list_for_project)
        .service(super::application::approve)
        .service(super::application::reject)
        // profiles and skills
        .service(super::profile::featured)
        .service(super::profile::by_username)
        .service(super::profile::update)
        .service(super::profile::skills)
        .service(super::profile::submit_review)
        // notifications
        .service(super::notification::list)
        .service(super::notification::mark_read)
        // moderation
        .service(super::admin::list_users)
        .service(super::admin::update_user)
        .service(super::admin::pending_projects)
        .service(super::admin::approve_project)
        .service(super::admin::reject_project)
}
