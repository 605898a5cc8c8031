use crate::models::users::{
    entities::UserType,
    requests::{UpdateUserRequest, UserFormParams},
};
use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_username(user_name: &str) -> Result<(), &'static str> {
    if user_name.trim().is_empty() {
        return Err("User name can't be blank");
    }
    if user_name.len() > 255 {
        return Err("User name is too long (maximum is 255 characters)");
    }
    // 只能包含字母、数字、下划线或连字符
    if !USERNAME_RE.is_match(user_name) {
        return Err("User name must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_name(field: &'static str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} can't be blank"));
    }
    Ok(())
}

pub fn validate_user_type(value: &str) -> Result<UserType, &'static str> {
    if value.trim().is_empty() {
        return Err("Type can't be blank");
    }
    value
        .parse::<UserType>()
        .map_err(|_| "Type is not included in the list")
}

/// 校验管理员提交的用户表单
///
/// 收集所有字段的错误后一次返回；只有全部字段合法时才产出可写入的更新请求。
/// 空字符串的 email / id_number 视为未填写。
pub fn validate_user_form(form: &UserFormParams) -> Result<UpdateUserRequest, Vec<String>> {
    let mut errors = Vec::new();

    let user_name = form.user_name.as_deref().unwrap_or_default().trim();
    if let Err(e) = validate_username(user_name) {
        errors.push(e.to_string());
    }

    let first_name = form.first_name.as_deref().unwrap_or_default().trim();
    if let Err(e) = validate_name("First name", first_name) {
        errors.push(e);
    }

    let last_name = form.last_name.as_deref().unwrap_or_default().trim();
    if let Err(e) = validate_name("Last name", last_name) {
        errors.push(e);
    }

    let user_type = match validate_user_type(form.user_type.as_deref().unwrap_or_default()) {
        Ok(t) => Some(t),
        Err(e) => {
            errors.push(e.to_string());
            None
        }
    };

    let email = non_blank(form.email.as_deref());
    if let Some(email) = email
        && let Err(e) = validate_email(email)
    {
        errors.push(e.to_string());
    }

    let id_number = non_blank(form.id_number.as_deref());

    match user_type {
        Some(user_type) if errors.is_empty() => Ok(UpdateUserRequest {
            user_name: user_name.to_string(),
            email: email.map(str::to_string),
            id_number: id_number.map(str::to_string),
            user_type,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }),
        _ => Err(errors),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
