use crate::AppState;
use crate::api::schema::{
    LOGIN_USER, LoginData, LoginVariables, REGISTER_USER, RegisterData, RegisterVariables,
};
use crate::error::{AppError, Result};
use crate::form::FormState;
use crate::models::{AuthPayload, Identity};
use crate::routes::{Navigation, Route};

/// 登录成功后写入会话并跳转首页；字段错误写回表单
pub async fn login(state: &mut AppState, form: &mut FormState) -> Result<Navigation> {
    let username = form.value("username").to_string();
    let password = form.value("password").to_string();
    let token = state.bearer()?;

    let result = state
        .api
        .execute::<_, LoginData>(
            LOGIN_USER,
            LoginVariables {
                username: &username,
                password: &password,
            },
            token.as_deref(),
        )
        .await
        .map(|data| data.login);

    establish_session(state, form, result)
}

pub async fn register(state: &mut AppState, form: &mut FormState) -> Result<Navigation> {
    let username = form.value("username").to_string();
    let email = form.value("email").to_string();
    let password = form.value("password").to_string();
    let confirm_password = form.value("confirmPassword").to_string();
    let token = state.bearer()?;

    let result = state
        .api
        .execute::<_, RegisterData>(
            REGISTER_USER,
            RegisterVariables {
                username: &username,
                email: &email,
                password: &password,
                confirm_password: &confirm_password,
            },
            token.as_deref(),
        )
        .await
        .map(|data| data.register);

    establish_session(state, form, result)
}

pub fn logout(state: &mut AppState) -> Result<()> {
    state.session.logout()
}

fn establish_session(
    state: &mut AppState,
    form: &mut FormState,
    result: Result<AuthPayload>,
) -> Result<Navigation> {
    let payload = match result {
        Ok(payload) => payload,
        Err(e) => {
            if let AppError::Validation(errors) = &e {
                form.set_errors(errors.clone());
            }
            return Err(e);
        }
    };

    let identity = Identity::from_auth_payload(payload)?;
    state.session.login(identity)?;
    form.clear_errors();
    Ok(Navigation::Redirect(Route::Home))
}
