use actix_session::Session;
use actix_web::{web, HttpResponse};
use askama::Template;
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::{Validate, ValidationErrors};

use crate::error::AppResult;
use crate::handlers::{html, redirect, set_flash, sign_in, sign_out, take_flash, Notice};
use crate::services::accounts;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    notice: Option<Notice>,
}

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate {
    notice: Option<Notice>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirm: String,
}

pub async fn login_page(session: Session) -> AppResult<HttpResponse> {
    let page = LoginTemplate {
        notice: take_flash(&session),
    };
    Ok(html(page.render()?))
}

pub async fn login(
    pool: web::Data<SqlitePool>,
    session: Session,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let mut conn = pool.acquire().await?;
    match accounts::verify(&mut conn, form.username.trim(), &form.password).await {
        Ok(account) => {
            sign_in(&session, account.id, &account.username);
            set_flash(
                &session,
                Notice::success(format!("Welcome back, {}", account.username)),
            );
            Ok(redirect("/"))
        }
        Err(err) => {
            set_flash(&session, Notice::error(err.to_string()));
            Ok(redirect("/login"))
        }
    }
}

pub async fn register_page(session: Session) -> AppResult<HttpResponse> {
    let page = RegisterTemplate {
        notice: take_flash(&session),
    };
    Ok(html(page.render()?))
}

pub async fn register(
    pool: web::Data<SqlitePool>,
    session: Session,
    form: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        set_flash(&session, Notice::error(first_message(&errors)));
        return Ok(redirect("/register"));
    }

    let mut conn = pool.acquire().await?;
    match accounts::create(&mut conn, form.username.trim(), form.email.trim(), &form.password).await
    {
        Ok(account) => {
            set_flash(
                &session,
                Notice::success(format!(
                    "Account `{}` created, you can log in now",
                    account.username
                )),
            );
            Ok(redirect("/login"))
        }
        Err(err) => {
            set_flash(&session, Notice::error(err.to_string()));
            Ok(redirect("/register"))
        }
    }
}

pub async fn logout(session: Session) -> HttpResponse {
    sign_out(&session);
    set_flash(&session, Notice::success("You have been logged out"));
    redirect("/")
}

fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|field| field.iter())
        .filter_map(|error| error.message.as_ref())
        .map(|message| message.to_string())
        .next()
        .unwrap_or_else(|| "Invalid registration details".to_string())
}
